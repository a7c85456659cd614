//! Previews of what a sensitive tool call is about to do.
//!
//! [`preview`] is shown above the permission prompt: a coloured unified diff
//! for `write_file` (all additions when the file is new), the command line
//! for `run_command`, and the message for `git_commit`.

use colored::Colorize;
use serde_json::{Map, Value};
use similar::{ChangeTag, TextDiff};
use std::path::Path;

use crate::constants::PROMPT_PREVIEW_CHARS;
use crate::format::truncate_chars;
use crate::tools::resolve_path;

/// Build a preview for a sensitive call, or `None` when there is nothing
/// useful to show (unknown tool or malformed input).
pub fn preview(tool_name: &str, input: &Map<String, Value>, working_dir: &Path) -> Option<String> {
    let field = |key| str_field(input, key);

    match tool_name {
        "write_file" => {
            let path = field("path")?;
            let new_content = field("content")?;
            let full_path = resolve_path(working_dir, path);

            match std::fs::read_to_string(&full_path) {
                Ok(old_content) => Some(unified_diff(&old_content, new_content, path)),
                Err(_) => Some(new_file_preview(new_content, path)),
            }
        }
        "run_command" => {
            let command = field("command")?;
            Some(format!(
                "{} {}",
                "$".dimmed(),
                truncate_chars(command, PROMPT_PREVIEW_CHARS)
            ))
        }
        "git_commit" => {
            let message = field("message")?;
            Some(format!(
                "{} {}",
                "commit message:".dimmed(),
                truncate_chars(message, PROMPT_PREVIEW_CHARS)
            ))
        }
        _ => None,
    }
}

fn str_field<'a>(input: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

/// Generate a colored unified diff string.
///
/// Returns just the header when the contents are identical.
pub fn unified_diff(old: &str, new: &str, path: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- a/{}\n", path));
    output.push_str(&format!("+++ b/{}\n", path));

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        output.push_str(&format!("{}", hunk.header()));

        for change in hunk.iter_changes() {
            match change.tag() {
                ChangeTag::Delete => {
                    output.push_str(&format!("{}", format!("-{}", change).red()));
                }
                ChangeTag::Insert => {
                    output.push_str(&format!("{}", format!("+{}", change).green()));
                }
                ChangeTag::Equal => {
                    output.push_str(&format!(" {}", change));
                }
            };
        }
    }

    output
}

/// Preview for a file that does not exist yet: every line is an addition.
pub fn new_file_preview(content: &str, path: &str) -> String {
    let mut output = String::new();
    output.push_str("--- /dev/null\n");
    output.push_str(&format!("+++ b/{}\n", path));

    for line in content.lines() {
        output.push_str(&format!("{}", format!("+{}\n", line).green()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_write_preview_for_new_file() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let input = map(json!({"path": "new.txt", "content": "a\nb\n"}));

        let out = preview("write_file", &input, dir.path()).unwrap();
        assert!(out.starts_with("--- /dev/null\n+++ b/new.txt\n"));
        assert!(out.contains("+a\n+b\n"));
    }

    #[test]
    fn test_write_preview_diffs_existing_file() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "keep\nold\n").unwrap();
        let input = map(json!({"path": "f.txt", "content": "keep\nnew\n"}));

        let out = preview("write_file", &input, dir.path()).unwrap();
        assert!(out.contains("-old"));
        assert!(out.contains("+new"));
        assert!(out.contains(" keep"));
    }

    #[test]
    fn test_command_and_commit_previews() {
        colored::control::set_override(false);
        let cwd = Path::new(".");
        let out = preview("run_command", &map(json!({"command": "ls -la"})), cwd).unwrap();
        assert_eq!(out, "$ ls -la");

        let out = preview("git_commit", &map(json!({"message": "fix"})), cwd).unwrap();
        assert_eq!(out, "commit message: fix");
    }

    #[test]
    fn test_no_preview_for_malformed_input() {
        assert!(preview("write_file", &map(json!({"path": "x"})), Path::new(".")).is_none());
        assert!(preview("read_file", &map(json!({"path": "x"})), Path::new(".")).is_none());
    }
}
