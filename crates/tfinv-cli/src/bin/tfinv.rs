//! Dynamic Ansible inventory backed by Terraform outputs
//!
//! Implements the external inventory script contract: `--list` prints the
//! full inventory with embedded hostvars, `--host <ADDR>` prints the
//! variables of one host. Runs from any directory.

use std::sync::Arc;

use clap::{CommandFactory, Parser};
use color_eyre::Result;
use tracing::warn;

use tfinv_cli::config::Config;
use tfinv_cli::init_tracing;
use tfinv_exec::LocalRunner;
use tfinv_inventory::{DOCKER_VMS, DynamicInventory, TerraformOutputs, TerraformSource};

#[derive(Parser)]
#[command(name = "tfinv")]
#[command(about = "Terraform dynamic inventory", long_about = None)]
struct Cli {
    /// List all hosts
    #[arg(long)]
    list: bool,

    /// Get variables for specific host
    #[arg(long, value_name = "ADDR")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    // stdout carries only the requested JSON document
    if cli.list {
        let inventory = build_inventory().await?;
        println!("{}", serde_json::to_string_pretty(&inventory)?);
    } else if let Some(addr) = cli.host.as_deref() {
        let inventory = build_inventory().await?;
        match inventory.host_vars(addr) {
            Some(vars) => println!("{}", serde_json::to_string_pretty(vars)?),
            None => println!("{{}}"),
        }
    } else {
        Cli::command().print_help()?;
    }

    Ok(())
}

/// Query terraform and assemble the inventory document
///
/// A failed or undecodable terraform query degrades to an empty inventory
/// so a missing state never breaks the calling playbook. Anything else,
/// a terraform binary that cannot be launched included, stays fatal.
async fn build_inventory() -> Result<DynamicInventory> {
    let config = Config::load_default()?;
    let source = TerraformSource::new(Arc::new(LocalRunner::new()), config.terraform_dir()?)
        .with_bin(&config.terraform.bin);

    let outputs = match source.fetch().await {
        Ok(outputs) => outputs,
        Err(err) if err.degrades_to_empty() => {
            warn!(error = %err, "terraform query failed, serving empty inventory");
            TerraformOutputs::empty()
        }
        Err(err) => return Err(err.into()),
    };

    let hosts = outputs.vm_collection(DOCKER_VMS)?;
    Ok(DynamicInventory::build(&hosts, &config.vars))
}
