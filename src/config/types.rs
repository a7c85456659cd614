//! Struct definitions and serde defaults for openclaude configuration.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::constants::{ANTHROPIC_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Root configuration, deserialized from `config.json`.
///
/// Every field has a serde default so a partial file (or none at all) works.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Model identifier sent with each request.
    pub model: String,
    /// Upper bound on tokens generated per response.
    pub max_tokens: u32,
    /// Sensitive tools approved without prompting at session start.
    pub default_approved_tools: Vec<String>,
    /// Cap on model round-trips per turn. `None` means unbounded; zero is
    /// rejected as malformed.
    pub max_tool_rounds: Option<NonZeroUsize>,
    /// Kill subprocesses (shell and git) after this many seconds.
    pub command_timeout_secs: Option<u64>,
    /// Override for the Anthropic API endpoint.
    pub api_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            default_approved_tools: Vec::new(),
            max_tool_rounds: None,
            command_timeout_secs: None,
            api_base_url: None,
        }
    }
}

impl Config {
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(ANTHROPIC_BASE_URL)
    }
}
