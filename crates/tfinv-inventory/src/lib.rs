//! tfinv-inventory: Terraform-to-Ansible inventory pipeline
//!
//! Queries `terraform output -json`, normalizes the VM collection into host
//! records and emits them either as a static grouped hosts file or as a
//! dynamic inventory document.

pub mod dynamic;
pub mod error;
pub mod hosts_file;
pub mod terraform;
pub mod types;

pub use dynamic::DynamicInventory;
pub use error::InventoryError;
pub use terraform::{TerraformOutputs, TerraformSource};
pub use types::{DOCKER_VMS, GroupVars, HostRecord, VmId, VmRecord};
