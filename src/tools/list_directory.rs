use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

use super::{resolve_path, Tool, ToolError};

pub struct ListDirectoryTool {
    working_dir: PathBuf,
}

impl ListDirectoryTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }
}

#[derive(Deserialize)]
struct ListDirectoryInput {
    path: String,
}

#[async_trait::async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "Lists files and directories in the given path"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": { "type": "string" }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: ListDirectoryInput = serde_json::from_value(input)?;
        let dir = resolve_path(&self.working_dir, &input.path);
        if !dir.is_dir() {
            return Err(ToolError::NotADirectory(input.path));
        }

        // Entries come back in whatever order the filesystem yields them.
        let entries = fs::read_dir(&dir).map_err(|e| ToolError::io(e, &input.path))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ToolError::io(e, &input.path))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names.join("\n"))
    }
}
