use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use super::{resolve_path, Tool, ToolError};

pub struct ReadFileTool {
    /// Relative paths are resolved against this.
    working_dir: PathBuf,
}

impl ReadFileTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }
}

#[derive(Deserialize)]
struct ReadFileInput {
    path: String,
}

#[async_trait::async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Reads the content of the file"
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
        let input: ReadFileInput = serde_json::from_value(input)?;
        let path = resolve_path(&self.working_dir, &input.path);

        // read_to_string reports invalid UTF-8 as InvalidData
        std::fs::read_to_string(&path).map_err(|e| ToolError::io(e, &input.path))
    }
}
