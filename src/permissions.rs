//! Approval gate for sensitive tool calls.
//!
//! [`PermissionGate`] tracks which sensitive tools the user has approved for
//! the session and asks a [`Confirm`] implementation about everything else.
//! [`PermissionGate::decide`] is the pure decision; [`PermissionGate::authorize`]
//! adds the interactive step on top of it.

use anyhow::Result;
use colored::Colorize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::diff;

/// Outcome of authorizing one tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// Why a call may proceed without asking, or that it needs asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The tool cannot change anything outside the conversation.
    NotSensitive,
    /// The tool is sensitive but approved for this session.
    PreApproved,
    /// The user has to say yes to this particular call.
    NeedsConfirmation,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("'{0}' is not a sensitive tool")]
    InvalidTool(String),
}

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on stderr and reads the answer from stdin.
///
/// Only `y`/`yes` (any case) counts as consent; anything else, including
/// end of input, is a no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        eprint!("{} {} ", prompt.bold(), "[y/N]:".dimmed());
        io::stderr().flush()?;

        let mut response = String::new();
        io::stdin().lock().read_line(&mut response)?;

        Ok(matches!(
            response.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Session-scoped approval state for sensitive tools.
pub struct PermissionGate {
    /// Every sensitive tool name, taken from the registry at startup.
    sensitive: BTreeSet<String>,
    /// Always a subset of `sensitive`.
    approved: BTreeSet<String>,
    confirm: Box<dyn Confirm>,
    /// Used to read the current file when previewing a write.
    working_dir: PathBuf,
}

impl PermissionGate {
    /// Build a gate over the given sensitive tools.
    ///
    /// Names in `default_approved` that are not sensitive are dropped with a
    /// warning; approval only means something for gated tools.
    pub fn new(
        sensitive: impl IntoIterator<Item = String>,
        default_approved: &[String],
        confirm: Box<dyn Confirm>,
        working_dir: PathBuf,
    ) -> Self {
        let sensitive: BTreeSet<String> = sensitive.into_iter().collect();
        let mut approved = BTreeSet::new();
        for name in default_approved {
            if sensitive.contains(name) {
                approved.insert(name.clone());
            } else {
                warn!(tool = %name, "ignoring pre-approval for a tool that is not sensitive");
            }
        }

        Self {
            sensitive,
            approved,
            confirm,
            working_dir,
        }
    }

    /// Decide whether `tool_name` may run without asking.
    pub fn decide(&self, tool_name: &str) -> Decision {
        if !self.sensitive.contains(tool_name) {
            Decision::NotSensitive
        } else if self.approved.contains(tool_name) {
            Decision::PreApproved
        } else {
            Decision::NeedsConfirmation
        }
    }

    /// Authorize one call, asking the user when [`Self::decide`] says so.
    ///
    /// A "yes" covers this call only. A prompt that cannot be read counts as
    /// a refusal.
    pub fn authorize(&mut self, tool_name: &str, input: &Map<String, Value>) -> Authorization {
        match self.decide(tool_name) {
            Decision::NotSensitive | Decision::PreApproved => Authorization::Allowed,
            Decision::NeedsConfirmation => {
                let prompt = self.prompt_for(tool_name, input);
                match self.confirm.confirm(&prompt) {
                    Ok(true) => Authorization::Allowed,
                    Ok(false) => {
                        debug!(tool = tool_name, "user declined tool call");
                        Authorization::Denied
                    }
                    Err(e) => {
                        warn!(tool = tool_name, error = %e, "failed to read confirmation");
                        Authorization::Denied
                    }
                }
            }
        }
    }

    /// Pre-approve a sensitive tool for the rest of the session.
    ///
    /// Returns `false` if it was already approved.
    pub fn approve(&mut self, tool_name: &str) -> Result<bool, PermissionError> {
        self.check_sensitive(tool_name)?;
        Ok(self.approved.insert(tool_name.to_string()))
    }

    /// Withdraw a pre-approval. Returns `false` if it was not approved.
    pub fn revoke(&mut self, tool_name: &str) -> Result<bool, PermissionError> {
        self.check_sensitive(tool_name)?;
        Ok(self.approved.remove(tool_name))
    }

    /// Sensitive tools with their approval status, sorted by name.
    pub fn statuses(&self) -> Vec<(&str, bool)> {
        self.sensitive
            .iter()
            .map(|name| (name.as_str(), self.approved.contains(name)))
            .collect()
    }

    #[cfg(test)]
    pub fn approved(&self) -> &BTreeSet<String> {
        &self.approved
    }

    fn check_sensitive(&self, tool_name: &str) -> Result<(), PermissionError> {
        if self.sensitive.contains(tool_name) {
            Ok(())
        } else {
            Err(PermissionError::InvalidTool(tool_name.to_string()))
        }
    }

    /// The question put to the user, preceded by a preview of the call.
    fn prompt_for(&self, tool_name: &str, input: &Map<String, Value>) -> String {
        let question = format!("Allow {} operation?", tool_name);
        match diff::preview(tool_name, input, &self.working_dir) {
            Some(preview) => format!("\n{}\n{}", preview, question),
            None => question,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{sensitive, ScriptedConfirm};
    use super::*;

    fn gate(approved: &[&str], confirm: &ScriptedConfirm) -> PermissionGate {
        let approved: Vec<String> = approved.iter().map(|s| s.to_string()).collect();
        PermissionGate::new(
            sensitive(),
            &approved,
            Box::new(confirm.clone()),
            PathBuf::from("."),
        )
    }

    #[test]
    fn test_non_sensitive_never_prompts() {
        let confirm = ScriptedConfirm::answering(&[]);
        let mut gate = gate(&[], &confirm);
        for tool in ["read_file", "list_directory", "search_files", "git_status", "mystery"] {
            assert_eq!(gate.decide(tool), Decision::NotSensitive);
            assert_eq!(gate.authorize(tool, &Map::new()), Authorization::Allowed);
        }
        assert_eq!(confirm.prompt_count(), 0);
    }

    #[test]
    fn test_pre_approved_skips_prompt() {
        let confirm = ScriptedConfirm::answering(&[]);
        let mut gate = gate(&["run_command"], &confirm);
        assert_eq!(gate.decide("run_command"), Decision::PreApproved);
        assert_eq!(gate.authorize("run_command", &Map::new()), Authorization::Allowed);
        assert_eq!(confirm.prompt_count(), 0);
    }

    #[test]
    fn test_unapproved_sensitive_prompts_every_time() {
        let confirm = ScriptedConfirm::answering(&[true, false]);
        let mut gate = gate(&[], &confirm);

        assert_eq!(gate.authorize("git_commit", &Map::new()), Authorization::Allowed);
        // Saying yes once does not approve the tool for later calls.
        assert_eq!(gate.decide("git_commit"), Decision::NeedsConfirmation);
        assert_eq!(gate.authorize("git_commit", &Map::new()), Authorization::Denied);

        assert_eq!(confirm.prompt_count(), 2);
        assert!(confirm.prompts.borrow()[0].ends_with("Allow git_commit operation?"));
    }

    #[test]
    fn test_unreadable_confirmation_denies() {
        let confirm = ScriptedConfirm::answering(&[]);
        let mut gate = gate(&[], &confirm);
        assert_eq!(gate.authorize("write_file", &Map::new()), Authorization::Denied);
    }

    #[test]
    fn test_defaults_are_filtered_to_sensitive_tools() {
        let confirm = ScriptedConfirm::default();
        let gate = gate(&["read_file", "write_file", "bogus"], &confirm);
        let approved: Vec<&str> = gate.approved().iter().map(|s| s.as_str()).collect();
        assert_eq!(approved, vec!["write_file"]);
    }

    #[test]
    fn test_approve_then_revoke_restores_state() {
        let confirm = ScriptedConfirm::default();
        let mut gate = gate(&["git_commit"], &confirm);
        let before = gate.approved().clone();

        assert_eq!(gate.approve("run_command"), Ok(true));
        assert_eq!(gate.decide("run_command"), Decision::PreApproved);
        assert_eq!(gate.revoke("run_command"), Ok(true));

        assert_eq!(gate.approved(), &before);
    }

    #[test]
    fn test_approve_and_revoke_report_no_change() {
        let confirm = ScriptedConfirm::default();
        let mut gate = gate(&["write_file"], &confirm);
        assert_eq!(gate.approve("write_file"), Ok(false));
        assert_eq!(gate.revoke("run_command"), Ok(false));
    }

    #[test]
    fn test_invalid_tool_names_are_rejected() {
        let confirm = ScriptedConfirm::default();
        let mut gate = gate(&[], &confirm);
        assert_eq!(
            gate.approve("read_file"),
            Err(PermissionError::InvalidTool("read_file".into()))
        );
        assert_eq!(
            gate.revoke("nope").unwrap_err().to_string(),
            "'nope' is not a sensitive tool"
        );
        assert!(gate.approved().is_empty());
    }

    #[test]
    fn test_statuses_list_every_sensitive_tool() {
        let confirm = ScriptedConfirm::default();
        let gate = gate(&["run_command"], &confirm);
        assert_eq!(
            gate.statuses(),
            vec![
                ("git_commit", false),
                ("run_command", true),
                ("write_file", false)
            ]
        );
    }
}
