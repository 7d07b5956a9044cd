//! Inventory type definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inventory group holding the Terraform-managed virtual machines
///
/// The group name is a compatibility constant: the consuming Ansible setup
/// addresses these hosts through it in both the static and the dynamic
/// format.
pub const DOCKER_VMS: &str = "docker_vms";

/// Identifier that Terraform may emit as a JSON number or as a string
///
/// Kept in whichever form it arrived in and re-serialized identically, so a
/// numeric `vm_id` stays a number in the dynamic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VmId {
    /// Numeric identifier
    Num(serde_json::Number),
    /// String identifier
    Str(String),
}

impl std::fmt::Display for VmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VmId::Num(n) => write!(f, "{n}"),
            VmId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&VmId> for Value {
    fn from(id: &VmId) -> Self {
        match id {
            VmId::Num(n) => Value::Number(n.clone()),
            VmId::Str(s) => Value::String(s.clone()),
        }
    }
}

/// One virtual machine entry as Terraform reports it
///
/// Decoding validates the required fields up front, so a broken record
/// fails with a typed error instead of surfacing at first use.
#[derive(Debug, Clone, Deserialize)]
pub struct VmRecord {
    /// Primary address; doubles as the inventory key
    pub ip_address: String,
    /// Descriptive label
    pub hostname: String,
    /// VM identifier (number or string)
    pub vm_id: VmId,
    /// Node the VM runs on
    pub node_name: String,
    /// MAC address; some providers omit it
    #[serde(default)]
    pub mac_address: String,
}

/// Normalized host projection consumed by both emitters
#[derive(Debug, Clone)]
pub struct HostRecord {
    /// Host address (the VM's `ip_address`)
    pub address: String,
    /// Descriptive label
    pub hostname: String,
    /// VM identifier, kept in its source form
    pub vm_id: VmId,
    /// Node the VM runs on
    pub node_name: String,
    /// Name of the VM entry in the source collection
    pub vm_name: String,
    /// MAC address, empty when the source omitted it
    pub mac_address: String,
}

impl HostRecord {
    /// Project a decoded VM entry into the normalized host record
    #[must_use]
    pub fn from_vm(name: &str, vm: VmRecord) -> Self {
        Self {
            address: vm.ip_address,
            hostname: vm.hostname,
            vm_id: vm.vm_id,
            node_name: vm.node_name,
            vm_name: name.to_string(),
            mac_address: vm.mac_address,
        }
    }
}

/// Group-level variables shared by every host in the group
///
/// The defaults are what the consuming playbooks were written against;
/// overriding them changes both emitters the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupVars {
    /// SSH user Ansible logs in as
    #[serde(default = "default_user")]
    pub ansible_user: String,
    /// Private key Ansible authenticates with
    #[serde(default = "default_key_file")]
    pub ansible_ssh_private_key_file: String,
}

fn default_user() -> String {
    "ubuntu".to_string()
}

fn default_key_file() -> String {
    "~/.ssh/id_rsa".to_string()
}

impl Default for GroupVars {
    fn default() -> Self {
        Self {
            ansible_user: default_user(),
            ansible_ssh_private_key_file: default_key_file(),
        }
    }
}
