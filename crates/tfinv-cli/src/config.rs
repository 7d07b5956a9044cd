//! Configuration loading and types
//!
//! Both binaries read the same `tfinv.toml`. Every field has a default, so
//! running without a config file works: the Terraform directory and the
//! hosts file are then found relative to the installed executable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tfinv_inventory::GroupVars;

/// Top-level configuration for the inventory binaries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Terraform invocation settings
    #[serde(default)]
    pub terraform: TerraformConfig,
    /// Static inventory output settings
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Group variables applied to every emitted host
    #[serde(default)]
    pub vars: GroupVars,
}

/// Terraform invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerraformConfig {
    /// Directory holding the Terraform state to query
    pub dir: Option<PathBuf>,
    /// Binary to invoke
    #[serde(default = "default_bin")]
    pub bin: String,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            dir: None,
            bin: default_bin(),
        }
    }
}

fn default_bin() -> String {
    "terraform".to_string()
}

/// Static inventory output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Path the generated hosts file is written to
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &PathBuf) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    pub fn load_default() -> eyre::Result<Self> {
        // Check environment variable
        if let Ok(path) = std::env::var("TFINV_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        // Try common paths
        let paths = [
            PathBuf::from("tfinv.toml"),
            PathBuf::from("/etc/tfinv/tfinv.toml"),
            dirs::config_dir()
                .map(|p| p.join("tfinv/tfinv.toml"))
                .unwrap_or_default(),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        // Return default config if no file found
        tracing::warn!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Directory to run terraform in
    ///
    /// Defaults to `../../terraform` next to the executable, mirroring the
    /// repository layout the binaries ship in.
    pub fn terraform_dir(&self) -> eyre::Result<PathBuf> {
        match &self.terraform.dir {
            Some(dir) => Ok(dir.clone()),
            None => exe_relative(&["..", "..", "terraform"]),
        }
    }

    /// Path the static hosts file is written to
    ///
    /// Defaults to `../inventories/production/hosts.ini` next to the
    /// executable.
    pub fn hosts_path(&self) -> eyre::Result<PathBuf> {
        match &self.inventory.path {
            Some(path) => Ok(path.clone()),
            None => exe_relative(&["..", "inventories", "production", "hosts.ini"]),
        }
    }
}

fn exe_relative(parts: &[&str]) -> eyre::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let mut path = exe
        .parent()
        .ok_or_else(|| eyre::eyre!("executable path has no parent directory"))?
        .to_path_buf();
    for part in parts {
        path.push(part);
    }
    Ok(path)
}
