//! Error types for tfinv-inventory

use thiserror::Error;

/// Errors that can occur while querying Terraform and building inventory
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// Terraform exited with a nonzero status
    #[error("terraform output failed with status {status}: {stderr}")]
    CommandFailed {
        /// Exit status code
        status: i32,
        /// Captured stderr
        stderr: String,
    },

    /// Terraform's stdout was not valid JSON
    #[error("malformed terraform output: {0}")]
    MalformedOutput(String),

    /// The external command could not be run at all
    #[error("execution error: {0}")]
    Exec(String),

    /// A VM record is missing required fields or carries the wrong types
    #[error("invalid record {name:?}: {reason}")]
    InvalidRecord {
        /// Key of the record in the source collection
        name: String,
        /// Decode failure description
        reason: String,
    },

    /// The collection value had an unexpected JSON shape
    #[error("output {key:?} is not an object (found {found})")]
    UnexpectedShape {
        /// Top-level output key that was inspected
        key: String,
        /// JSON type found instead of an object
        found: &'static str,
    },

    /// Writing the rendered inventory file failed
    #[error("failed to write inventory: {0}")]
    Write(String),
}

impl InventoryError {
    /// Whether the dynamic entry point answers this failure with an empty
    /// inventory instead of exiting nonzero
    ///
    /// Only the two source-query failures degrade; everything else is fatal
    /// in both entry points.
    #[must_use]
    pub fn degrades_to_empty(&self) -> bool {
        matches!(
            self,
            InventoryError::CommandFailed { .. } | InventoryError::MalformedOutput(_)
        )
    }
}
