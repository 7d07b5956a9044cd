//! Static INI-style hosts file rendering and atomic writing

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::InventoryError;
use crate::types::{DOCKER_VMS, GroupVars, HostRecord};

/// Render the hosts file for the given hosts, in order
///
/// The output is byte-deterministic for a given input and carries no
/// trailing newline, matching what the consuming playbooks were written
/// against.
#[must_use]
pub fn render(hosts: &[HostRecord], vars: &GroupVars) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{DOCKER_VMS}]");
    for host in hosts {
        let _ = writeln!(
            out,
            "{} ansible_host={} hostname={} vm_id={} node_name={} vm_name={}",
            host.address, host.address, host.hostname, host.vm_id, host.node_name, host.vm_name
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[{DOCKER_VMS}:vars]");
    let _ = writeln!(out, "ansible_user={}", vars.ansible_user);
    let _ = write!(
        out,
        "ansible_ssh_private_key_file={}",
        vars.ansible_ssh_private_key_file
    );
    out
}

/// Write the rendered content to `path`, replacing any previous file
///
/// Missing parent directories are created. The content lands in a
/// temporary file next to the target first and is renamed over it, so a
/// reader never observes a half-written inventory.
pub fn write(path: &Path, content: &str) -> Result<(), InventoryError> {
    let dir = path
        .parent()
        .ok_or_else(|| InventoryError::Write(format!("{} has no parent", path.display())))?;
    std::fs::create_dir_all(dir).map_err(|err| InventoryError::Write(err.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|err| InventoryError::Write(err.to_string()))?;
    tmp.write_all(content.as_bytes())
        .map_err(|err| InventoryError::Write(err.to_string()))?;
    tmp.persist(path)
        .map_err(|err| InventoryError::Write(err.to_string()))?;

    info!(path = %path.display(), "inventory written");
    Ok(())
}
