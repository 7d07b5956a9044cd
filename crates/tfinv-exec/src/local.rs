//! Local command execution using `tokio::process`

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::ExecError;
use crate::result::CommandOutput;
use crate::traits::CommandRunner;

/// Local command runner
///
/// Executes programs on the local machine using `tokio::process::Command`.
/// Arguments are passed as a vector and nothing goes through a shell, so
/// caller-provided paths need no quoting.
#[derive(Debug, Clone)]
pub struct LocalRunner;

impl LocalRunner {
    /// Create a new local runner
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for LocalRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
    ) -> Result<CommandOutput, ExecError> {
        debug!(program = %program, dir = %dir.display(), "executing command");

        let child = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::Spawn {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecError::Io(e.to_string()))?;

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(program = %program, status = status, "command completed");

        if !output.status.success() {
            error!(
                program = %program,
                status = status,
                stderr = %stderr,
                "command failed"
            );
        }

        Ok(CommandOutput {
            status,
            stdout,
            stderr,
        })
    }
}
