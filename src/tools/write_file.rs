//! Write-file tool: overwrites (or creates) a file with UTF-8 content.

use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

use super::{resolve_path, Tool, ToolError};

/// Tool that writes string content to a file.
///
/// Existing files are truncated. The parent directory must already exist;
/// a missing parent is reported back as a not-found error.
pub struct WriteFileTool {
    /// Relative paths are resolved against this.
    working_dir: PathBuf,
}

impl WriteFileTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }
}

#[derive(Deserialize)]
struct WriteFileInput {
    path: String,
    content: String,
}

#[async_trait::async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Writes content to the file"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string" },
                "content": { "type": "string" }
            },
            "required": ["path", "content"]
        })
    }

    fn is_sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: WriteFileInput = serde_json::from_value(input)?;
        let path = resolve_path(&self.working_dir, &input.path);

        fs::write(&path, &input.content).map_err(|e| ToolError::io(e, &input.path))?;

        Ok(format!("File '{}' written successfully", input.path))
    }
}
