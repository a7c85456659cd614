//! File loading for openclaude configuration.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::Config;

impl Config {
    /// Load `./config.json`, else the platform config file, else defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::candidate_paths())
    }

    /// Use the first existing file in `candidates`.
    ///
    /// A file that exists but cannot be read or parsed is reported with a
    /// warning and yields the defaults; later candidates are not consulted.
    pub fn load_from(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match fs::read_to_string(path) {
                Ok(contents) => return Self::parse(path, &contents),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                    return Self::default();
                }
            }
        }
        debug!("no config file found, using defaults");
        Self::default()
    }

    fn parse(path: &Path, contents: &str) -> Self {
        match serde_json::from_str(contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&[dir.path().join("config.json")]);
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "claude-3-7-sonnet-latest");
        assert_eq!(config.max_tokens, 1000);
        assert!(config.default_approved_tools.is_empty());
        assert_eq!(config.base_url(), "https://api.anthropic.com");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"max_tokens": 4096, "default_approved_tools": ["write_file"], "command_timeout_secs": 30}"#,
        )
        .unwrap();

        let config = Config::load_from(&[path]);
        assert_eq!(config.model, "claude-3-7-sonnet-latest");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.default_approved_tools, vec!["write_file"]);
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.max_tool_rounds, None);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.json");
        let good = dir.path().join("good.json");
        fs::write(&broken, "{ not json").unwrap();
        fs::write(&good, r#"{"model": "claude-other"}"#).unwrap();

        let config = Config::load_from(&[broken, good]);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_round_cap_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, r#"{"max_tool_rounds": 0, "model": "claude-other"}"#).unwrap();
        assert_eq!(Config::load_from(&[path.clone()]), Config::default());

        fs::write(&path, r#"{"max_tool_rounds": 3}"#).unwrap();
        let config = Config::load_from(&[path]);
        assert_eq!(config.max_tool_rounds.map(|n| n.get()), Some(3));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local.json");
        let global = dir.path().join("global.json");
        fs::write(&global, r#"{"model": "global-model"}"#).unwrap();

        let config = Config::load_from(&[local.clone(), global.clone()]);
        assert_eq!(config.model, "global-model");

        fs::write(&local, r#"{"model": "local-model", "api_base_url": "http://localhost:9"}"#)
            .unwrap();
        let config = Config::load_from(&[local, global]);
        assert_eq!(config.model, "local-model");
        assert_eq!(config.base_url(), "http://localhost:9");
    }
}
