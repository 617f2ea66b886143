//! Subprocess invocation
//!
//! Exactly one invocation per call: no retries, no timeout. The caller
//! blocks until the child exits, which is the documented suspension point
//! for every handler.

use pgforge_common::{Error, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Map a non-zero exit to `Error::Tool` carrying the captured error
    /// stream, or stdout when stderr is empty.
    pub fn require_success(self, tool: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        let detail = if self.stderr.trim().is_empty() {
            self.stdout.trim().to_string()
        } else {
            self.stderr.trim().to_string()
        };
        Err(Error::tool(tool, detail))
    }
}

/// Run an external executable to completion, capturing both streams as text.
pub async fn run(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    envs: &[(&str, &str)],
) -> Result<CommandOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }

    debug!("running {} {:?}", program, args);

    let output = cmd.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ToolNotFound(program.to_string())
        } else {
            Error::Io(e)
        }
    })?;

    Ok(CommandOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let out = run("sh", &["-c", "printf 'hello'"], None, &[]).await.unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "");
    }

    #[tokio::test]
    async fn test_run_captures_stderr_and_exit_code() {
        let out = run("sh", &["-c", "echo denied >&2; exit 1"], None, &[])
            .await
            .unwrap();
        assert_eq!(out.code, 1);
        assert_eq!(out.stderr.trim(), "denied");
    }

    #[tokio::test]
    async fn test_run_passes_env_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let out = run("sh", &["-c", "pwd; printf '%s' \"$PGFORGE_TEST\""], Some(dir.path()), &[("PGFORGE_TEST", "on")])
            .await
            .unwrap();
        assert!(out.stdout.ends_with("on"));
        assert!(out.stdout.contains(dir.path().file_name().unwrap().to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_not_found() {
        let err = run("pgforge-no-such-binary", &[], None, &[]).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[test]
    fn test_require_success_prefers_stderr() {
        let out = CommandOutput {
            code: 2,
            stdout: "ignored".into(),
            stderr: "bad plan\n".into(),
        };
        let err = out.require_success("terraform").unwrap_err();
        assert_eq!(err.to_string(), "terraform failed: bad plan");
    }

    #[test]
    fn test_require_success_falls_back_to_stdout() {
        let out = CommandOutput {
            code: 2,
            stdout: "full log\n".into(),
            stderr: "".into(),
        };
        let err = out.require_success("terraform").unwrap_err();
        assert_eq!(err.to_string(), "terraform failed: full log");
    }
}
