//! Captured output of a finished command

use serde::{Deserialize, Serialize};

/// Result of a command execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit status code (0 for success, -1 when killed by a signal)
    pub status: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CommandOutput {
    /// Check if the command exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}
