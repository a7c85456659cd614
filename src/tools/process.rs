//! Subprocess helpers shared by `run_command` and the git tools.

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use super::ToolError;

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// A non-zero exit status is not an error; only failing to launch (or
/// running past `timeout`) is. The child is killed if the timeout fires.
pub async fn run(mut cmd: Command, timeout: Option<Duration>) -> Result<Output, ToolError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(ToolError::CommandFailed)?;

    match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(ToolError::CommandFailed),
            Err(_) => Err(ToolError::TimedOut(limit.as_secs())),
        },
        None => child.wait_with_output().await.map_err(ToolError::CommandFailed),
    }
}

/// Stdout directly followed by stderr, trimmed. No separator is added.
pub fn merged_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim().to_string()
}

/// A command that runs `line` through the platform shell.
pub fn shell(line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(line);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    }
}
