//! Run-command tool: shell command execution in the working directory.

use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

use super::process;
use super::{Tool, ToolError};

/// Tool that executes shell commands in a child process.
///
/// Stdout and stderr are merged and trimmed. The exit status is not
/// reported as a failure; the model sees whatever the command printed.
pub struct RunCommandTool {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl RunCommandTool {
    pub fn new(working_dir: PathBuf, timeout: Option<Duration>) -> Self {
        Self {
            working_dir,
            timeout,
        }
    }
}

#[derive(Deserialize)]
struct RunCommandInput {
    command: String,
}

#[async_trait::async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Runs a shell command and returns the output"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": { "type": "string" }
            },
            "required": ["command"]
        })
    }

    fn is_sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: RunCommandInput = serde_json::from_value(input)?;

        let mut cmd = process::shell(&input.command);
        cmd.current_dir(&self.working_dir);

        let output = process::run(cmd, self.timeout).await?;
        let text = process::merged_output(&output);

        if text.is_empty() {
            Ok("Command executed (no output)".to_string())
        } else {
            Ok(text)
        }
    }
}
