//! Centralized constants for openclaude.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "openclaude";

/// Default Claude model identifier.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";

/// Default maximum tokens for a single model response.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Configuration filename, looked up in the working directory first.
pub const CONFIG_FILENAME: &str = "config.json";

/// File holding the stored API key inside the config directory.
pub const CREDENTIALS_FILENAME: &str = "credentials";

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "OPENCLAUDE_LOG";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

// --- Anthropic API ---

/// Default base URL for the Anthropic API.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Value of the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

// --- Tool results ---

/// Result delivered to the model when the user declines a sensitive call.
pub const PERMISSION_DENIED: &str = "Permission denied";

/// Byte threshold for binary file detection (check first N bytes for null).
pub const BINARY_DETECTION_BYTES: usize = 8192;

/// Maximum characters of a tool result echoed to the terminal.
pub const TOOL_RESULT_PREVIEW_CHARS: usize = 2000;

/// Maximum characters of a command or commit message shown in a permission prompt.
pub const PROMPT_PREVIEW_CHARS: usize = 200;
