//! Interactive chat REPL.
//!
//! Reads lines with [`rustyline`] (history, line editing) and hands each one
//! to the [`Session`], which keeps the whole conversation so the model sees
//! every earlier turn.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::config::Config;
use crate::constants::HISTORY_FILENAME;
use crate::output::{Renderer, StdoutRenderer};
use crate::session::Session;

/// Runs the interactive chat REPL until `/exit`, Ctrl+C or Ctrl+D.
///
/// A failed turn is reported and the loop keeps going. Readline history is
/// kept in `~/.cache/openclaude/chat_history.txt`.
pub async fn run_chat(session: &mut Session) -> Result<()> {
    println!("{}", "Welcome to OpenClaude!".bold().green());
    println!(
        "{}",
        "Type /help for commands or /exit to quit.".dimmed()
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()
        .map(|dir| dir.join(HISTORY_FILENAME))
        .ok();
    if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
        let _ = rl.load_history(path);
    }

    loop {
        let readline = rl.readline(&format!("{} ", "You>".cyan().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if line.starts_with('/') {
                    let action =
                        commands::handle_slash_command(&line, session, &mut |prompt: &str| {
                            rl.readline(prompt)
                        });
                    match action {
                        commands::CommandAction::Continue => continue,
                        commands::CommandAction::Exit => {
                            println!("{}", "Goodbye!".yellow());
                            break;
                        }
                        commands::CommandAction::Unknown(cmd) => {
                            println!(
                                "{} Unknown command: {} (try /help)",
                                "?".yellow(),
                                cmd
                            );
                            continue;
                        }
                    }
                }

                println!();
                let mut renderer = StdoutRenderer::new();
                if let Err(e) = session.submit(&line, &mut renderer).await {
                    renderer.error(&e.to_string());
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Exiting REPL...".yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Err(e) = rl.save_history(&path) {
            warn!(error = %e, "failed to save readline history");
        }
    }

    Ok(())
}
