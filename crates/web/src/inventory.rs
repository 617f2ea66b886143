//! Ansible inventory generation
//!
//! The inventory is rebuilt wholesale from Terraform outputs on every apply.
//! The `[replicas]` section is written even when empty; a cluster with no
//! replicas is a valid shape, not a failure.

use pgforge_common::Result;
use std::path::Path;

/// Render the grouped host list: one primary, zero-or-more replicas in
/// input order.
pub fn render(primary: &str, replicas: &[String]) -> String {
    let mut out = String::new();
    out.push_str("[primary]\n");
    out.push_str(primary);
    out.push('\n');
    out.push_str("\n[replicas]\n");
    for replica in replicas {
        out.push_str(replica);
        out.push('\n');
    }
    out
}

/// Write the inventory file, replacing any prior content.
pub fn write(path: &Path, primary: &str, replicas: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render(primary, replicas))?;
    Ok(())
}
