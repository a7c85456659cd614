//! Local tools the model may call, and the registry that executes them.
//!
//! Every tool implements [`Tool`]. [`ToolRegistry`] maps tool names to
//! handlers and is the executor boundary: [`ToolRegistry::execute`] always
//! returns a string, with failures rendered as `Error: ...` so the model can
//! read and react to them.

pub mod error;
pub mod git;
pub mod list_directory;
pub mod process;
pub mod read_file;
pub mod run_command;
pub mod search_files;
pub mod write_file;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use error::ToolError;

use git::{GitCommitTool, GitStatusTool};
use list_directory::ListDirectoryTool;
use read_file::ReadFileTool;
use run_command::RunCommandTool;
use search_files::SearchFilesTool;
use write_file::WriteFileTool;

/// Definition sent to the model so it knows what tools are available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Every tool implements this trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Human-readable description sent alongside the schema.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn schema(&self) -> Value;

    /// Whether the tool can change state outside the conversation
    /// (files, processes, version control). Sensitive tools go through
    /// the permission gate.
    fn is_sensitive(&self) -> bool {
        false
    }

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value) -> Result<String, ToolError>;
}

/// Holds all registered tools and dispatches calls by name.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a tool. Called during startup. A later tool with the same
    /// name replaces the earlier one.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        match self.by_name.get(&name) {
            Some(&idx) => self.tools[idx] = Arc::from(tool),
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(Arc::from(tool));
            }
        }
    }

    /// Produce definitions for the model (sent in every request).
    pub fn list_tools(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.schema(),
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.by_name.get(name).map(|&idx| &self.tools[idx])
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| t.is_sensitive())
    }

    /// Names of all sensitive tools, in registration order.
    pub fn sensitive_names(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|t| t.is_sensitive())
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Look up a tool by name and execute it.
    ///
    /// Never fails: unknown tools, bad input and I/O errors all come back as
    /// an `Error: ...` string.
    pub async fn execute(&self, name: &str, input: &Map<String, Value>) -> String {
        let outcome = match self.get(name) {
            Some(tool) => tool.execute(Value::Object(input.clone())).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };
        match outcome {
            Ok(output) => output,
            Err(e) => {
                debug!(tool = name, error = %e, "tool failed");
                format!("Error: {}", e)
            }
        }
    }

    /// How many tools are registered.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolRegistry {
    /// Create a registry with all built-in tools.
    ///
    /// Relative paths given by the model resolve against `working_dir`.
    /// `command_timeout` bounds `run_command` and the git tools; `None`
    /// lets them run until they exit.
    pub fn with_builtins(working_dir: PathBuf, command_timeout: Option<Duration>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ListDirectoryTool::new(working_dir.clone())));
        registry.register(Box::new(ReadFileTool::new(working_dir.clone())));
        registry.register(Box::new(WriteFileTool::new(working_dir.clone())));
        registry.register(Box::new(RunCommandTool::new(
            working_dir.clone(),
            command_timeout,
        )));
        registry.register(Box::new(GitStatusTool::new(
            working_dir.clone(),
            command_timeout,
        )));
        registry.register(Box::new(GitCommitTool::new(
            working_dir.clone(),
            command_timeout,
        )));
        registry.register(Box::new(SearchFilesTool::new(working_dir)));
        registry
    }
}

/// Resolve a path given by the model against the working directory.
pub(crate) fn resolve_path(working_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}
