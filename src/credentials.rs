//! API key lookup and storage.
//!
//! Resolution order: the `ANTHROPIC_API_KEY` environment variable, the
//! stored key file in the config directory, then an interactive prompt
//! whose answer is saved for next time.

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::{API_KEY_ENV, CREDENTIALS_FILENAME};

/// Return the Anthropic API key, prompting for (and storing) it if needed.
pub fn get_api_key() -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        let key = key.trim();
        if !key.is_empty() {
            debug!("using API key from environment");
            return Ok(key.to_string());
        }
    }

    let path = key_path()?;
    if let Some(key) = read_stored(&path) {
        debug!(path = %path.display(), "using stored API key");
        return Ok(key);
    }

    let key = prompt_hidden("Enter your Anthropic API key: ")?;
    if key.is_empty() {
        bail!("No API key provided");
    }
    if let Err(e) = store(&path, &key) {
        warn!(path = %path.display(), error = %e, "could not save API key");
    }
    Ok(key)
}

fn key_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join(CREDENTIALS_FILENAME))
}

fn read_stored(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let key = contents.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Write the key to `path`, readable only by the owner on Unix.
fn store(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", key))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Restores cooked mode even if reading keys fails part way.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read a line without echoing it. Falls back to a plain read when stdin
/// is not a terminal.
fn prompt_hidden(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim().to_string());
    }

    let line = read_hidden_line();
    eprintln!();
    match line? {
        Some(key) => Ok(key.trim().to_string()),
        None => bail!("Cancelled"),
    }
}

/// Collect keystrokes in raw mode until Enter. `None` on Ctrl+C or Esc.
fn read_hidden_line() -> Result<Option<String>> {
    let _raw = RawModeGuard::enable()?;
    let mut input = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(Some(input)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(None),
            KeyCode::Esc => return Ok(None),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("credentials");

        assert_eq!(read_stored(&path), None);
        store(&path, "sk-ant-test").unwrap();
        assert_eq!(read_stored(&path).as_deref(), Some("sk-ant-test"));
    }

    #[test]
    fn test_blank_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(read_stored(&path), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_stored_key_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");
        store(&path, "sk-ant-test").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
