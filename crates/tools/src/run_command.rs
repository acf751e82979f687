//! Run Command Tool
//!
//! Executes a shell command with captured stdout/stderr and a bounded
//! timeout. A non-zero exit is a failed result that still carries the
//! captured output and exit code.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use buildforge_core::{ParameterSchema, Tool, ToolContext, ToolResult};

/// Default command timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Run command tool — shell execution with output capture.
pub struct RunCommandTool {
    timeout: Duration,
}

impl RunCommandTool {
    /// Create a tool with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the timeout (mainly for tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn shell_invocation(command: &str) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }
        #[cfg(not(target_os = "windows"))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl Default for RunCommandTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command and capture stdout, stderr, and the exit code. Runs in the project directory unless cwd is given."
    }

    fn parameters_schema(&self) -> ParameterSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "command".to_string(),
            ParameterSchema::string(Some("The shell command to execute")),
        );
        properties.insert(
            "cwd".to_string(),
            ParameterSchema::string(Some("Working directory for the command")),
        );
        ParameterSchema::object(
            Some("Run command parameters"),
            properties,
            vec!["command".to_string()],
        )
    }

    async fn execute(&self, ctx: &ToolContext, args: Value) -> ToolResult {
        let command = args
            .get("command")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let cwd = args
            .get("cwd")
            .and_then(|v| v.as_str())
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| ctx.project_root.clone());

        let mut cmd = Self::shell_invocation(command);
        cmd.current_dir(&cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(%command, cwd = %cwd.display(), "running command");

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return ToolResult::err(format!("Failed to spawn command: {}", e)),
            Err(_) => {
                return ToolResult::err(format!(
                    "Command timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            ToolResult::ok(json!({"stdout": stdout, "stderr": stderr}))
        } else {
            let exit_code = output.status.code().unwrap_or(-1);
            ToolResult::err_with_data(
                format!("Command failed with exit code {}", exit_code),
                json!({"stdout": stdout, "stderr": stderr, "exit_code": exit_code}),
            )
        }
    }
}
