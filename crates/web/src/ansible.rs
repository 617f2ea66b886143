//! Ansible playbook invocation and private-key lifecycle
//!
//! The SSH private key obtained from Terraform output lives on disk only
//! for the duration of one apply cycle: written owner read-only before the
//! playbook runs, removed afterwards regardless of the playbook's outcome.

use crate::runner::{self, CommandOutput};
use pgforge_common::Result;
use std::path::{Path, PathBuf};

/// ansible-playbook wrapper bound to one playbook
pub struct Ansible {
    bin: String,
    playbook: PathBuf,
}

impl Ansible {
    pub fn new(bin: String, playbook: PathBuf) -> Self {
        Self { bin, playbook }
    }

    /// Apply the playbook to the hosts in `inventory`, authenticating with
    /// `private_key`, in verbose mode.
    pub async fn run_playbook(
        &self,
        inventory: &Path,
        private_key: &Path,
    ) -> Result<CommandOutput> {
        let inventory = inventory.to_string_lossy();
        let playbook = self.playbook.to_string_lossy();
        let key = private_key.to_string_lossy();
        runner::run(
            &self.bin,
            &[
                "-i",
                inventory.as_ref(),
                playbook.as_ref(),
                "--private-key",
                key.as_ref(),
                "-v",
            ],
            None,
            &[],
        )
        .await
    }
}

/// Persist the private key, replacing any prior file at the same path,
/// then restrict it to owner read-only.
pub fn write_private_key(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // A prior key is mode 0400 and cannot be overwritten in place.
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    std::fs::write(path, key)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o400))?;
    }
    Ok(())
}

/// Remove the private key if present. A missing file is not an error.
pub fn remove_private_key(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
