use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{resolve_path, Tool, ToolError};

use crate::constants::BINARY_DETECTION_BYTES;

pub struct SearchFilesTool {
    working_dir: PathBuf,
}

impl SearchFilesTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Walk every file under `root`, symlinks included, collecting `file:line: text` for lines
    /// containing `pattern`. Paths are reported under `shown_root`, the
    /// directory as the caller spelled it.
    fn search(&self, root: &Path, shown_root: &str, pattern: &str) -> Vec<String> {
        let mut matches = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(text) = read_text(entry.path()) else {
                continue;
            };

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let shown = Path::new(shown_root).join(relative);

            for (line_num, line) in text.lines().enumerate() {
                if line.contains(pattern) {
                    matches.push(format!(
                        "{}:{}: {}",
                        shown.display(),
                        line_num + 1,
                        line.trim()
                    ));
                }
            }
        }

        matches
    }
}

/// Read a file as UTF-8 text. Binary, undecodable and unreadable files
/// yield `None`.
fn read_text(path: &Path) -> Option<String> {
    let content = fs::read(path).ok()?;

    let check_len = content.len().min(BINARY_DETECTION_BYTES);
    if content[..check_len].contains(&0) {
        return None;
    }

    String::from_utf8(content).ok()
}

fn default_path() -> String {
    ".".to_string()
}

#[derive(Deserialize)]
struct SearchFilesInput {
    pattern: String,
    #[serde(default = "default_path")]
    path: String,
}

#[async_trait::async_trait]
impl Tool for SearchFilesTool {
    fn name(&self) -> &str {
        "search_files"
    }

    fn description(&self) -> &str {
        "Searches for a pattern in files within a directory"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search",
                    "default": "."
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: SearchFilesInput = serde_json::from_value(input)?;
        let root = resolve_path(&self.working_dir, &input.path);
        if !root.is_dir() {
            return Err(ToolError::NotADirectory(input.path));
        }

        let matches = self.search(&root, &input.path, &input.pattern);

        if matches.is_empty() {
            Ok(format!(
                "No matches found for '{}' in '{}'",
                input.pattern, input.path
            ))
        } else {
            Ok(matches.join("\n"))
        }
    }
}
