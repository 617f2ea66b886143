//! Terraform CLI wrapper
//!
//! Every invocation runs in the project directory with color output
//! disabled through the environment. Terraform's planning and execution
//! semantics are entirely delegated; this module only assembles arguments
//! and interprets exit codes and output values.

use crate::runner::{self, CommandOutput};
use pgforge_common::{ClusterRequest, Error, Result};
use std::path::PathBuf;

/// Environment overrides applied to every terraform invocation
const TERRAFORM_ENV: &[(&str, &str)] = &[("TF_IN_AUTOMATION", "1"), ("NO_COLOR", "1")];

/// Terraform wrapper bound to one project directory
pub struct Terraform {
    bin: String,
    project_dir: PathBuf,
}

impl Terraform {
    pub fn new(bin: String, project_dir: PathBuf) -> Self {
        Self { bin, project_dir }
    }

    async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        runner::run(&self.bin, args, Some(&self.project_dir), TERRAFORM_ENV).await
    }

    pub async fn init(&self) -> Result<CommandOutput> {
        self.run(&["init"]).await
    }

    pub async fn plan(&self) -> Result<CommandOutput> {
        self.run(&["plan"]).await
    }

    pub async fn apply(&self) -> Result<CommandOutput> {
        self.run(&["apply", "-auto-approve"]).await
    }

    pub async fn destroy(&self) -> Result<CommandOutput> {
        self.run(&["destroy", "-auto-approve"]).await
    }

    /// Read a scalar output value. A non-zero exit is an error.
    pub async fn output_raw(&self, name: &str) -> Result<String> {
        let out = self
            .run(&["output", "-raw", name])
            .await?
            .require_success("terraform output")?;
        Ok(out.stdout.trim().to_string())
    }

    /// Read a list output value, decoded from JSON. An absent output yields
    /// an empty list rather than a failure.
    pub async fn output_json_list(&self, name: &str) -> Result<Vec<String>> {
        let out = self.run(&["output", "-json", name]).await?;
        if !out.success() {
            return Ok(Vec::new());
        }
        serde_json::from_str(out.stdout.trim())
            .map_err(|e| Error::OutputParse(format!("output {}: {}", name, e)))
    }

    /// Overwrite the project's variables file with the five cluster
    /// declarations. String values are quoted, numeric values are bare.
    /// No merge with prior content.
    pub fn write_variables(&self, req: &ClusterRequest) -> Result<()> {
        let content = format!(
            "variable \"postgres_version\" {{ default = \"{}\" }}\n\
             variable \"instance_type\" {{ default = \"{}\" }}\n\
             variable \"num_replicas\" {{ default = {} }}\n\
             variable \"max_connections\" {{ default = {} }}\n\
             variable \"shared_buffers\" {{ default = \"{}\" }}\n",
            req.postgres_version,
            req.instance_type,
            req.num_replicas,
            req.max_connections,
            req.shared_buffers,
        );
        std::fs::create_dir_all(&self.project_dir)?;
        std::fs::write(self.project_dir.join("variables.tf"), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn request() -> ClusterRequest {
        ClusterRequest {
            postgres_version: "16.2".into(),
            instance_type: "t3.medium".into(),
            num_replicas: 2,
            max_connections: 200,
            shared_buffers: "1GB".into(),
        }
    }

    #[test]
    fn test_write_variables_five_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let tf = Terraform::new("terraform".into(), dir.path().to_path_buf());
        tf.write_variables(&request()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("variables.tf")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "variable \"postgres_version\" { default = \"16.2\" }");
        assert_eq!(lines[1], "variable \"instance_type\" { default = \"t3.medium\" }");
        assert_eq!(lines[2], "variable \"num_replicas\" { default = 2 }");
        assert_eq!(lines[3], "variable \"max_connections\" { default = 200 }");
        assert_eq!(lines[4], "variable \"shared_buffers\" { default = \"1GB\" }");
    }

    #[test]
    fn test_write_variables_overwrites_prior_file() {
        let dir = tempfile::tempdir().unwrap();
        let tf = Terraform::new("terraform".into(), dir.path().to_path_buf());
        std::fs::write(dir.path().join("variables.tf"), "stale content").unwrap();

        tf.write_variables(&request()).unwrap();
        let content = std::fs::read_to_string(dir.path().join("variables.tf")).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 5);
    }

    #[tokio::test]
    async fn test_output_json_list_absent_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        // sh stands in for terraform: "output -json x" exits 1 when absent
        std::fs::write(dir.path().join("fake-tf"), "#!/bin/sh\nexit 1\n").unwrap();
        mark_executable(&dir.path().join("fake-tf"));

        let tf = Terraform::new(
            dir.path().join("fake-tf").to_string_lossy().into_owned(),
            dir.path().to_path_buf(),
        );
        let replicas = tf.output_json_list("replica_public_ips").await.unwrap();
        assert!(replicas.is_empty());
    }

    #[tokio::test]
    async fn test_output_json_list_decodes_addresses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fake-tf"),
            "#!/bin/sh\nprintf '[\"5.6.7.8\",\"9.10.11.12\"]'\n",
        )
        .unwrap();
        mark_executable(&dir.path().join("fake-tf"));

        let tf = Terraform::new(
            dir.path().join("fake-tf").to_string_lossy().into_owned(),
            dir.path().to_path_buf(),
        );
        let replicas = tf.output_json_list("replica_public_ips").await.unwrap();
        assert_eq!(replicas, vec!["5.6.7.8", "9.10.11.12"]);
    }

    fn mark_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
