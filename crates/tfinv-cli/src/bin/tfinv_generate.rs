//! Static Ansible inventory generator
//!
//! Queries the Terraform outputs and rewrites the grouped hosts file the
//! playbooks consume, echoing the rendered inventory to stdout. Any
//! failure leaves the previous file untouched and exits nonzero.

use std::sync::Arc;

use color_eyre::Result;
use tracing::{error, info};

use tfinv_cli::config::Config;
use tfinv_cli::init_tracing;
use tfinv_exec::LocalRunner;
use tfinv_inventory::{DOCKER_VMS, InventoryError, TerraformSource, hosts_file};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = Config::load_default()?;
    let terraform_dir = config.terraform_dir()?;
    let source = TerraformSource::new(Arc::new(LocalRunner::new()), &terraform_dir)
        .with_bin(&config.terraform.bin);

    let outputs = match source.fetch().await {
        Ok(outputs) => outputs,
        Err(err) => {
            if matches!(err, InventoryError::CommandFailed { .. }) {
                error!(
                    dir = %terraform_dir.display(),
                    "make sure Terraform is initialized and applied in this directory"
                );
            }
            return Err(err.into());
        }
    };

    let hosts = outputs.vm_collection(DOCKER_VMS)?;
    let rendered = hosts_file::render(&hosts, &config.vars);

    let path = config.hosts_path()?;
    hosts_file::write(&path, &rendered)?;

    info!(path = %path.display(), hosts = hosts.len(), "ansible inventory generated");
    println!("{rendered}");

    Ok(())
}
