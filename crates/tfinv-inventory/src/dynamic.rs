//! Dynamic inventory document for Ansible's external inventory protocol

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{GroupVars, HostRecord};

/// Full `--list` document
///
/// Serializes to the shape Ansible expects from an external inventory
/// script: a `_meta.hostvars` map plus one entry per group. Hostvars are
/// embedded up front, so Ansible never calls back per host.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicInventory {
    #[serde(rename = "_meta")]
    meta: Meta,
    #[serde(rename = "docker_vms")]
    group: Group,
}

#[derive(Debug, Clone, Serialize)]
struct Meta {
    hostvars: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
struct Group {
    hosts: Vec<String>,
    vars: GroupVars,
}

impl DynamicInventory {
    /// Assemble the document from the decoded host records
    ///
    /// Hosts appear in input order. When two records share an address the
    /// later one wins in `hostvars` while `hosts` keeps every occurrence,
    /// so the collision stays visible to the operator.
    #[must_use]
    pub fn build(hosts: &[HostRecord], vars: &GroupVars) -> Self {
        let mut hostvars = Map::with_capacity(hosts.len());
        let mut addresses = Vec::with_capacity(hosts.len());

        for host in hosts {
            if hostvars.contains_key(&host.address) {
                warn!(
                    address = %host.address,
                    vm = %host.vm_name,
                    "duplicate address, later record wins in hostvars"
                );
            }
            addresses.push(host.address.clone());
            hostvars.insert(host.address.clone(), host_vars_value(host));
        }

        Self {
            meta: Meta { hostvars },
            group: Group {
                hosts: addresses,
                vars: vars.clone(),
            },
        }
    }

    /// Variables for a single host, as served by `--host`
    #[must_use]
    pub fn host_vars(&self, address: &str) -> Option<&Value> {
        self.meta.hostvars.get(address)
    }
}

fn host_vars_value(host: &HostRecord) -> Value {
    let mut vars = Map::new();
    vars.insert(
        "ansible_host".to_string(),
        Value::String(host.address.clone()),
    );
    vars.insert("hostname".to_string(), Value::String(host.hostname.clone()));
    vars.insert("vm_id".to_string(), Value::from(&host.vm_id));
    vars.insert(
        "node_name".to_string(),
        Value::String(host.node_name.clone()),
    );
    vars.insert("vm_name".to_string(), Value::String(host.vm_name.clone()));
    vars.insert(
        "mac_address".to_string(),
        Value::String(host.mac_address.clone()),
    );
    Value::Object(vars)
}
