//! Command runner trait

use std::path::Path;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandOutput;

/// Runs a program and captures its output
///
/// The seam exists so callers can substitute the external command, which is
/// how the inventory pipeline is exercised in tests without a real
/// Terraform checkout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside the working directory `dir`,
    /// capturing stdout and stderr until the process exits.
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or its output
    /// cannot be collected. A nonzero exit status is reported through the
    /// returned [`CommandOutput`], not as an error.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
    ) -> Result<CommandOutput, ExecError>;
}
