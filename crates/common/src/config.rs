//! Service configuration
//!
//! All tool and artifact paths are explicit configuration handed to the
//! server state at startup. Nothing reads ambient path constants, so tests
//! can run against isolated temporary directories.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// pgforge service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Terraform project directory
    pub terraform_dir: PathBuf,

    /// Ansible playbook applied to provisioned hosts
    pub playbook_path: PathBuf,

    /// Inventory file rebuilt on every apply
    pub inventory_path: PathBuf,

    /// Private key file persisted for the duration of one apply cycle
    pub private_key_path: PathBuf,

    /// Path to the terraform binary
    pub terraform_bin: Option<String>,

    /// Path to the ansible-playbook binary
    pub ansible_playbook_bin: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            terraform_dir: PathBuf::from("./terraform"),
            playbook_path: PathBuf::from("./ansible/playbook.yml"),
            inventory_path: PathBuf::from("./ansible/inventory.ini"),
            private_key_path: PathBuf::from("./ansible/.pg_cluster_key"),
            terraform_bin: None, // Use $PATH
            ansible_playbook_bin: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Terraform binary name or path
    pub fn terraform_bin(&self) -> String {
        self.terraform_bin
            .clone()
            .unwrap_or_else(|| "terraform".to_string())
    }

    /// ansible-playbook binary name or path
    pub fn ansible_playbook_bin(&self) -> String {
        self.ansible_playbook_bin
            .clone()
            .unwrap_or_else(|| "ansible-playbook".to_string())
    }

    /// Path of the generated Terraform variables file
    pub fn variables_path(&self) -> PathBuf {
        self.terraform_dir.join("variables.tf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServiceConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.terraform_bin(), "terraform");
        assert_eq!(cfg.variables_path(), PathBuf::from("./terraform/variables.tf"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pgforge.toml");

        let mut cfg = ServiceConfig::default();
        cfg.terraform_dir = dir.path().join("tf");
        cfg.terraform_bin = Some("/opt/bin/terraform".to_string());
        cfg.save(&path).unwrap();

        let loaded = ServiceConfig::load(&path).unwrap();
        assert_eq!(loaded.terraform_dir, cfg.terraform_dir);
        assert_eq!(loaded.terraform_bin(), "/opt/bin/terraform");
        assert_eq!(loaded.ansible_playbook_bin(), "ansible-playbook");
    }
}
