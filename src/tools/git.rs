//! Git tools: `git status` and `git commit` on staged changes.

use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

use super::{process, resolve_path, Tool, ToolError};

fn default_path() -> String {
    ".".to_string()
}

pub struct GitStatusTool {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl GitStatusTool {
    pub fn new(working_dir: PathBuf, timeout: Option<Duration>) -> Self {
        Self {
            working_dir,
            timeout,
        }
    }
}

#[derive(Deserialize)]
struct GitStatusInput {
    #[serde(default = "default_path")]
    path: String,
}

#[async_trait::async_trait]
impl Tool for GitStatusTool {
    fn name(&self) -> &str {
        "git_status"
    }

    fn description(&self) -> &str {
        "Shows the current status of a git repository"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to git repository",
                    "default": "."
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: GitStatusInput = serde_json::from_value(input)?;
        let repo = resolve_path(&self.working_dir, &input.path);
        if !repo.is_dir() {
            return Err(ToolError::NotADirectory(input.path));
        }

        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&repo).arg("status");
        let output = process::run(cmd, self.timeout).await?;
        let text = process::merged_output(&output);

        if text.is_empty() {
            Ok("No git status available".to_string())
        } else {
            Ok(text)
        }
    }
}

/// Commits whatever is already staged in the working directory's repository.
/// Nothing is staged on the model's behalf.
pub struct GitCommitTool {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl GitCommitTool {
    pub fn new(working_dir: PathBuf, timeout: Option<Duration>) -> Self {
        Self {
            working_dir,
            timeout,
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.working_dir);
        cmd
    }
}

#[derive(Deserialize)]
struct GitCommitInput {
    message: String,
}

#[async_trait::async_trait]
impl Tool for GitCommitTool {
    fn name(&self) -> &str {
        "git_commit"
    }

    fn description(&self) -> &str {
        "Commits staged changes with a message"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Commit message"
                }
            },
            "required": ["message"]
        })
    }

    fn is_sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: GitCommitInput = serde_json::from_value(input)?;
        if input.message.trim().is_empty() {
            return Err(ToolError::EmptyCommitMessage);
        }

        let mut staged_cmd = self.git();
        staged_cmd.args(["diff", "--cached", "--name-only"]);
        let staged = process::run(staged_cmd, self.timeout).await?;
        if String::from_utf8_lossy(&staged.stdout).trim().is_empty() {
            return Err(ToolError::NothingStaged);
        }

        let mut commit = self.git();
        commit.arg("commit").arg("-m").arg(&input.message);
        let output = process::run(commit, self.timeout).await?;
        let text = process::merged_output(&output);

        if text.is_empty() {
            Ok("Commit successful".to_string())
        } else {
            Ok(text)
        }
    }
}
