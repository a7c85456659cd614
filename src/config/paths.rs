//! Platform path resolution for openclaude's config and cache directories.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;
use crate::constants::{APP_NAME, CONFIG_FILENAME};

impl Config {
    /// Returns `~/.config/openclaude/` on Linux (`XDG_CONFIG_HOME/openclaude`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns `~/.cache/openclaude/` on Linux. Holds the readline history.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's cache directory cannot be determined.
    pub fn cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Config files to try, in priority order.
    pub(super) fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILENAME)];
        if let Ok(dir) = Self::config_dir() {
            paths.push(dir.join(CONFIG_FILENAME));
        }
        paths
    }
}
