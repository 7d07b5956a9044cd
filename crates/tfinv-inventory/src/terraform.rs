//! Terraform output acquisition and decoding

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tfinv_exec::traits::CommandRunner;
use tracing::debug;

use crate::error::InventoryError;
use crate::types::{HostRecord, VmRecord};

const OUTPUT_ARGS: [&str; 2] = ["output", "-json"];

/// Decoded `terraform output -json` document
///
/// The raw JSON is kept as-is; collections are pulled out of it on demand
/// so unrelated outputs in the same state never interfere.
#[derive(Debug, Clone, Default)]
pub struct TerraformOutputs {
    doc: Value,
}

impl TerraformOutputs {
    /// Parse the raw stdout of `terraform output -json`
    pub fn parse(raw: &str) -> Result<Self, InventoryError> {
        let doc = serde_json::from_str(raw)
            .map_err(|err| InventoryError::MalformedOutput(err.to_string()))?;
        Ok(Self { doc })
    }

    /// Outputs document with no entries, used when degrading
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extract the VM map stored under `key`, in document order
    ///
    /// An absent output or a null value yields an empty collection. A value
    /// of any shape other than an object is an error, and so is any entry
    /// that does not decode as a VM record.
    pub fn vm_collection(&self, key: &str) -> Result<Vec<HostRecord>, InventoryError> {
        let Some(value) = self.doc.get(key).and_then(|entry| entry.get("value")) else {
            debug!(key = %key, "output not present, treating as empty");
            return Ok(Vec::new());
        };

        match value {
            Value::Object(map) => {
                let mut hosts = Vec::with_capacity(map.len());
                for (name, entry) in map {
                    let vm: VmRecord = serde_json::from_value(entry.clone()).map_err(|err| {
                        InventoryError::InvalidRecord {
                            name: name.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                    hosts.push(HostRecord::from_vm(name, vm));
                }
                Ok(hosts)
            }
            Value::Null => Ok(Vec::new()),
            other => Err(InventoryError::UnexpectedShape {
                key: key.to_string(),
                found: json_type(other),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runs `terraform output -json` in a configured directory
pub struct TerraformSource {
    runner: Arc<dyn CommandRunner>,
    dir: PathBuf,
    bin: String,
}

impl TerraformSource {
    pub fn new(runner: Arc<dyn CommandRunner>, dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            dir: dir.into(),
            bin: "terraform".to_string(),
        }
    }

    /// Override the terraform binary name or path
    #[must_use]
    pub fn with_bin(mut self, bin: &str) -> Self {
        self.bin = bin.to_string();
        self
    }

    /// Directory the terraform commands run in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Query the configured state directory for its outputs
    ///
    /// A nonzero terraform exit becomes [`InventoryError::CommandFailed`]
    /// and undecodable stdout becomes [`InventoryError::MalformedOutput`];
    /// both degrade to an empty inventory. A runner that cannot launch the
    /// binary at all surfaces as [`InventoryError::Exec`] and does not.
    pub async fn fetch(&self) -> Result<TerraformOutputs, InventoryError> {
        debug!(dir = %self.dir.display(), bin = %self.bin, "querying terraform outputs");

        let output = self
            .runner
            .run(&self.bin, &OUTPUT_ARGS, &self.dir)
            .await
            .map_err(|err| InventoryError::Exec(err.to_string()))?;

        if !output.success() {
            return Err(InventoryError::CommandFailed {
                status: output.status,
                stderr: output.stderr,
            });
        }

        TerraformOutputs::parse(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tfinv_exec::{CommandOutput, ExecError};

    use super::*;

    struct StubRunner {
        result: Result<CommandOutput, ExecError>,
    }

    impl StubRunner {
        fn ok(stdout: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(CommandOutput {
                    status: 0,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                }),
            })
        }

        fn failed(status: i32, stderr: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(CommandOutput {
                    status,
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                }),
            })
        }

        fn broken() -> Arc<Self> {
            Arc::new(Self {
                result: Err(ExecError::Spawn {
                    program: "terraform".to_string(),
                    reason: "No such file or directory (os error 2)".to_string(),
                }),
            })
        }
    }

    #[async_trait]
    impl CommandRunner for StubRunner {
        async fn run(
            &self,
            _program: &str,
            _args: &[&str],
            _dir: &Path,
        ) -> Result<CommandOutput, ExecError> {
            self.result.clone()
        }
    }

    const SAMPLE: &str = r#"{
        "vms": {
            "value": {
                "vm1": {
                    "ip_address": "10.0.0.5",
                    "hostname": "h1",
                    "vm_id": 100,
                    "node_name": "node1"
                }
            }
        }
    }"#;

    #[tokio::test]
    async fn test_fetch_decodes_the_vm_collection() {
        let source = TerraformSource::new(StubRunner::ok(SAMPLE), "/tmp");
        let outputs = source.fetch().await.unwrap();
        let hosts = outputs.vm_collection("vms").unwrap();

        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].address, "10.0.0.5");
        assert_eq!(hosts[0].vm_name, "vm1");
    }

    #[tokio::test]
    async fn test_nonzero_exit_degrades_to_empty() {
        let source = TerraformSource::new(StubRunner::failed(1, "no state file"), "/tmp");
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, InventoryError::CommandFailed { status: 1, .. }));
        assert!(err.degrades_to_empty());
    }

    #[tokio::test]
    async fn test_malformed_stdout_degrades_to_empty() {
        let source = TerraformSource::new(StubRunner::ok("not json"), "/tmp");
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, InventoryError::MalformedOutput(_)));
        assert!(err.degrades_to_empty());
    }

    #[tokio::test]
    async fn test_unlaunchable_binary_does_not_degrade() {
        let source = TerraformSource::new(StubRunner::broken(), "/tmp");
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, InventoryError::Exec(_)));
        assert!(!err.degrades_to_empty());
    }

    #[tokio::test]
    async fn test_absent_output_key_is_an_empty_collection() {
        let source = TerraformSource::new(StubRunner::ok("{}"), "/tmp");
        let outputs = source.fetch().await.unwrap();

        assert!(outputs.vm_collection("vms").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_value_is_an_empty_collection() {
        let source = TerraformSource::new(StubRunner::ok(r#"{"vms": {"value": null}}"#), "/tmp");
        let outputs = source.fetch().await.unwrap();

        assert!(outputs.vm_collection("vms").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_value_is_a_shape_error() {
        let source = TerraformSource::new(StubRunner::ok(r#"{"vms": {"value": [1, 2]}}"#), "/tmp");
        let outputs = source.fetch().await.unwrap();
        let err = outputs.vm_collection("vms").unwrap_err();

        assert!(matches!(
            err,
            InventoryError::UnexpectedShape { found: "array", .. }
        ));
        assert!(!err.degrades_to_empty());
    }

    #[tokio::test]
    async fn test_broken_record_names_the_entry() {
        let raw = r#"{
            "vms": {
                "value": {
                    "vm7": {"ip_address": "10.0.0.7", "hostname": "h7", "vm_id": 107}
                }
            }
        }"#;
        let source = TerraformSource::new(StubRunner::ok(raw), "/tmp");
        let outputs = source.fetch().await.unwrap();
        let err = outputs.vm_collection("vms").unwrap_err();

        match err {
            InventoryError::InvalidRecord { ref name, .. } => assert_eq!(name, "vm7"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!outputs.vm_collection("vms").unwrap_err().degrades_to_empty());
    }

    #[tokio::test]
    async fn test_collection_preserves_document_order() {
        let raw = r#"{
            "vms": {
                "value": {
                    "b": {"ip_address": "10.0.0.2", "hostname": "hb", "vm_id": 2, "node_name": "n"},
                    "a": {"ip_address": "10.0.0.1", "hostname": "ha", "vm_id": 1, "node_name": "n"},
                    "c": {"ip_address": "10.0.0.3", "hostname": "hc", "vm_id": 3, "node_name": "n"}
                }
            }
        }"#;
        let source = TerraformSource::new(StubRunner::ok(raw), "/tmp");
        let outputs = source.fetch().await.unwrap();
        let hosts = outputs.vm_collection("vms").unwrap();

        let names: Vec<&str> = hosts.iter().map(|h| h.vm_name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_string_vm_id_is_tolerated() {
        let raw = r#"{
            "vms": {
                "value": {
                    "vm1": {
                        "ip_address": "10.0.0.5",
                        "hostname": "h1",
                        "vm_id": "pve-100",
                        "node_name": "node1"
                    }
                }
            }
        }"#;
        let source = TerraformSource::new(StubRunner::ok(raw), "/tmp");
        let outputs = source.fetch().await.unwrap();
        let hosts = outputs.vm_collection("vms").unwrap();

        assert_eq!(hosts[0].vm_id.to_string(), "pve-100");
    }
}
