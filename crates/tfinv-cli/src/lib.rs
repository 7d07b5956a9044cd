//! Shared pieces of the tfinv binaries
//!
//! Both entry points load the same configuration and log the same way;
//! only the emitted format differs.

pub mod config;

/// Initialize tracing for the inventory binaries
///
/// Logs go to stderr: stdout is the data channel Ansible reads, so it must
/// carry nothing but the inventory itself. Default level is `warn`,
/// overridable through `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
