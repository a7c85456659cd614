//! Slash command handlers for the chat REPL.
//!
//! Dispatches `/exit`, `/help` and `/permissions`. Command names are
//! matched case-insensitively. Returns a [`CommandAction`] so the REPL loop
//! can decide how to proceed.

use colored::Colorize;
use rustyline::error::ReadlineError;

use crate::permissions::PermissionGate;
use crate::session::Session;

/// Action returned by slash command handling.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandAction {
    /// Command was handled; keep reading input.
    Continue,
    /// Leave the REPL.
    Exit,
    /// Unknown command was entered.
    Unknown(String),
}

/// Reads one line after showing the given prompt.
pub(crate) type ReadLine<'a> = dyn FnMut(&str) -> Result<String, ReadlineError> + 'a;

/// Dispatch and handle a slash command.
///
/// A failure while reading menu input is reported and the REPL carries on.
pub(crate) fn handle_slash_command(
    command: &str,
    session: &mut Session,
    read_line: &mut ReadLine<'_>,
) -> CommandAction {
    match command.to_lowercase().as_str() {
        "/exit" => CommandAction::Exit,
        "/help" => {
            print_help(session);
            CommandAction::Continue
        }
        "/permissions" => {
            if let Err(e) = manage_permissions(session.gate_mut(), read_line) {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            CommandAction::Continue
        }
        _ => CommandAction::Unknown(command.to_string()),
    }
}

fn print_help(session: &Session) {
    println!("{}", "Commands:".bold());
    println!("  {} - exit the REPL", "/exit".cyan());
    println!("  {} - show this help", "/help".cyan());
    println!("  {} - manage tool permissions", "/permissions".cyan());
    println!();
    println!("{}", "Available tools:".bold());
    let tools = session.tools();
    for spec in tools.list_tools() {
        let marker = if tools.is_sensitive(&spec.name) {
            " (requires approval)".yellow().to_string()
        } else {
            String::new()
        };
        println!("  {}{} - {}", spec.name.cyan(), marker, spec.description);
    }
    println!();
    println!(
        "{}",
        "Configuration: edit config.json to set model, max_tokens, and default approved tools."
            .dimmed()
    );
}

/// One line typed in the permissions menu.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PermissionCommand {
    Approve(String),
    Revoke(String),
    Done,
    Invalid,
}

pub(crate) fn parse_permission_command(line: &str) -> PermissionCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [word] if word.eq_ignore_ascii_case("done") => PermissionCommand::Done,
        [verb, tool] if verb.eq_ignore_ascii_case("approve") => {
            PermissionCommand::Approve(tool.to_string())
        }
        [verb, tool] if verb.eq_ignore_ascii_case("revoke") => {
            PermissionCommand::Revoke(tool.to_string())
        }
        _ => PermissionCommand::Invalid,
    }
}

/// What to tell the user after a permissions menu command.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Reply {
    Changed(String),
    Unchanged(String),
    Error(String),
}

/// Apply a parsed command to `gate`. `None` means leave the menu.
pub(crate) fn apply_permission_command(
    gate: &mut PermissionGate,
    command: PermissionCommand,
) -> Option<Reply> {
    let reply = match command {
        PermissionCommand::Done => return None,
        PermissionCommand::Invalid => {
            Reply::Error("Invalid command. Use 'approve <tool>' or 'revoke <tool>'".to_string())
        }
        PermissionCommand::Approve(tool) => match gate.approve(&tool) {
            Ok(true) => Reply::Changed(format!("Approved: {}", tool)),
            Ok(false) => Reply::Unchanged(format!("{} is already approved", tool)),
            Err(e) => Reply::Error(e.to_string()),
        },
        PermissionCommand::Revoke(tool) => match gate.revoke(&tool) {
            Ok(true) => Reply::Changed(format!("Revoked: {}", tool)),
            Ok(false) => Reply::Unchanged(format!("{} is not approved", tool)),
            Err(e) => Reply::Error(e.to_string()),
        },
    };
    Some(reply)
}

/// Interactive permissions menu. Returns when the user types `done`,
/// presses Ctrl+C or sends EOF.
fn manage_permissions(
    gate: &mut PermissionGate,
    read_line: &mut ReadLine<'_>,
) -> Result<(), ReadlineError> {
    println!("{}", "Sensitive tools that can be pre-approved:".bold());
    for (tool, approved) in gate.statuses() {
        let status = if approved {
            "Approved".green()
        } else {
            "Not approved".yellow()
        };
        println!("  - {}: {}", tool, status);
    }
    println!();
    println!("To approve a tool, type 'approve <tool_name>'");
    println!("To revoke approval, type 'revoke <tool_name>'");
    println!("Type 'done' to exit permissions menu");

    loop {
        let line = match read_line(&format!("{} ", "permissions>".cyan().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };

        match apply_permission_command(gate, parse_permission_command(&line)) {
            None => break,
            Some(Reply::Changed(msg)) => println!("{}", msg.green()),
            Some(Reply::Unchanged(msg)) => println!("{}", msg.yellow()),
            Some(Reply::Error(msg)) => println!("{} {}", "Error:".red().bold(), msg),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::TurnOptions;
    use crate::permissions::testing::{sensitive, ScriptedConfirm};
    use crate::provider::mock::ScriptedClient;
    use crate::tools::ToolRegistry;
    use std::collections::VecDeque;
    use std::io;
    use std::path::PathBuf;

    fn gate() -> PermissionGate {
        PermissionGate::new(
            sensitive(),
            &["git_commit".to_string()],
            Box::new(ScriptedConfirm::default()),
            PathBuf::from("."),
        )
    }

    fn session() -> Session {
        Session::new(
            Box::new(ScriptedClient::new()),
            ToolRegistry::with_builtins(PathBuf::from("."), None),
            gate(),
            TurnOptions::default(),
        )
    }

    /// Feeds `lines` to the menu, then reports EOF.
    fn lines(lines: &[&str]) -> impl FnMut(&str) -> Result<String, ReadlineError> {
        let mut queue: VecDeque<String> = lines.iter().map(|l| l.to_string()).collect();
        move |_| queue.pop_front().ok_or(ReadlineError::Eof)
    }

    #[test]
    fn test_dispatch_slash_commands() {
        let mut session = session();
        let mut read = lines(&[]);

        assert_eq!(
            handle_slash_command("/exit", &mut session, &mut read),
            CommandAction::Exit
        );
        assert_eq!(
            handle_slash_command("/EXIT", &mut session, &mut read),
            CommandAction::Exit
        );
        assert_eq!(
            handle_slash_command("/help", &mut session, &mut read),
            CommandAction::Continue
        );
        assert_eq!(
            handle_slash_command("/Help", &mut session, &mut read),
            CommandAction::Continue
        );
        assert_eq!(
            handle_slash_command("/foo", &mut session, &mut read),
            CommandAction::Unknown("/foo".into())
        );
    }

    #[test]
    fn test_permissions_menu_applies_lines_until_done() {
        let mut session = session();
        let mut read = lines(&["approve write_file", "bogus", "done", "approve run_command"]);

        assert_eq!(
            handle_slash_command("/permissions", &mut session, &mut read),
            CommandAction::Continue
        );
        assert_eq!(
            session.gate_mut().statuses(),
            vec![("git_commit", true), ("run_command", false), ("write_file", true)]
        );
    }

    #[test]
    fn test_permissions_menu_read_failure_keeps_repl_going() {
        let mut session = session();
        let mut read = |_: &str| -> Result<String, ReadlineError> {
            Err(ReadlineError::Io(io::Error::new(io::ErrorKind::Other, "tty gone")))
        };

        assert_eq!(
            handle_slash_command("/permissions", &mut session, &mut read),
            CommandAction::Continue
        );
        assert_eq!(
            handle_slash_command("/exit", &mut session, &mut read),
            CommandAction::Exit
        );
    }

    #[test]
    fn test_parse_permission_command() {
        assert_eq!(parse_permission_command("done"), PermissionCommand::Done);
        assert_eq!(parse_permission_command("  DONE "), PermissionCommand::Done);
        assert_eq!(
            parse_permission_command("approve write_file"),
            PermissionCommand::Approve("write_file".into())
        );
        assert_eq!(
            parse_permission_command("Revoke run_command"),
            PermissionCommand::Revoke("run_command".into())
        );
        assert_eq!(parse_permission_command("approve"), PermissionCommand::Invalid);
        assert_eq!(
            parse_permission_command("approve a b"),
            PermissionCommand::Invalid
        );
        assert_eq!(parse_permission_command(""), PermissionCommand::Invalid);
        assert_eq!(parse_permission_command("grant x"), PermissionCommand::Invalid);
    }

    #[test]
    fn test_apply_approve_and_revoke() {
        let mut gate = gate();

        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Approve("write_file".into())),
            Some(Reply::Changed("Approved: write_file".into()))
        );
        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Approve("write_file".into())),
            Some(Reply::Unchanged("write_file is already approved".into()))
        );
        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Revoke("git_commit".into())),
            Some(Reply::Changed("Revoked: git_commit".into()))
        );
        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Revoke("run_command".into())),
            Some(Reply::Unchanged("run_command is not approved".into()))
        );
        assert_eq!(
            gate.statuses(),
            vec![("git_commit", false), ("run_command", false), ("write_file", true)]
        );
    }

    #[test]
    fn test_apply_rejects_non_sensitive_and_garbage() {
        let mut gate = gate();

        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Approve("read_file".into())),
            Some(Reply::Error("'read_file' is not a sensitive tool".into()))
        );
        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Invalid),
            Some(Reply::Error(
                "Invalid command. Use 'approve <tool>' or 'revoke <tool>'".into()
            ))
        );
        assert_eq!(
            apply_permission_command(&mut gate, PermissionCommand::Done),
            None
        );
    }
}
