//! Error types for tfinv-exec

use thiserror::Error;

/// Errors that can occur while launching and reaping a child process
///
/// A nonzero exit status is not an error at this layer; it is carried in
/// [`crate::result::CommandOutput`] and classified by the caller.
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// The program could not be started at all
    #[error("failed to spawn {program}: {reason}")]
    Spawn {
        /// Program that was being launched
        program: String,
        /// OS-level failure description
        reason: String,
    },

    /// I/O failure while waiting for the process or draining its pipes
    #[error("I/O error: {0}")]
    Io(String),
}
