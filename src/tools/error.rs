//! Tool failure taxonomy.
//!
//! Tools return [`ToolError`]; the registry renders it as `Error: <display>`
//! and hands it back to the model as an ordinary tool result.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    #[error("File or directory not found - '{path}' ({source})")]
    NotFound { path: String, source: io::Error },

    #[error("Permission denied - '{path}' ({source})")]
    PermissionDenied { path: String, source: io::Error },

    #[error("'{0}' is not valid UTF-8 text")]
    NotUtf8(String),

    #[error("Missing or invalid input - {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Commit message cannot be empty")]
    EmptyCommitMessage,

    #[error("No changes staged for commit")]
    NothingStaged,

    #[error("Command failed - {0}")]
    CommandFailed(#[source] io::Error),

    #[error("Command timed out after {0}s")]
    TimedOut(u64),

    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("An unexpected issue occurred - {0}")]
    Unexpected(#[source] io::Error),
}

impl ToolError {
    /// Classify a filesystem error on `path`.
    pub fn io(source: io::Error, path: &str) -> Self {
        let path = path.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::InvalidData => Self::NotUtf8(path),
            _ => Self::Unexpected(source),
        }
    }
}
