//! tfinv-exec: process execution for the inventory pipeline
//!
//! Provides the trait seam and local implementation for running the
//! provisioning tool and capturing its output.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalRunner;
pub use result::CommandOutput;
pub use traits::CommandRunner;
