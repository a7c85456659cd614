//! Command-line interface definition and dispatch for openclaude.
//!
//! Uses [`clap`] with derive macros. A query on the command line is answered
//! first; the interactive REPL follows unless `--print` was given.

use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use tracing::debug;

use crate::agent::TurnOptions;
use crate::chat;
use crate::config::Config;
use crate::credentials;
use crate::output::{Renderer, StdoutRenderer};
use crate::permissions::{PermissionGate, StdinConfirm};
use crate::provider::AnthropicClient;
use crate::session::Session;
use crate::tools::ToolRegistry;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "openclaude",
    version,
    about = "A terminal coding agent: Claude with tools for your project"
)]
pub struct Cli {
    /// Query to send before the REPL starts
    pub query: Vec<String>,
    /// Model to use (overrides config)
    #[arg(long)]
    pub model: Option<String>,
    /// Maximum tokens per response (overrides config)
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Answer the query and exit instead of starting the REPL
    #[arg(short, long)]
    pub print: bool,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Build the session and run the query and/or the REPL.
pub async fn run(cli: Cli) -> Result<()> {
    let query = cli.query.join(" ");
    let query = query.trim();
    if cli.print && query.is_empty() {
        bail!("--print needs a query. Usage: openclaude -p \"your question here\"");
    }

    let config = Config::load();
    let api_key = credentials::get_api_key()?;
    let working_dir = std::env::current_dir()?;
    let client = AnthropicClient::new(api_key, &config);
    let tools = ToolRegistry::with_builtins(working_dir.clone(), config.command_timeout());
    debug!(
        working_dir = %working_dir.display(),
        model = %config.model,
        tools = tools.len(),
        "starting session"
    );
    let gate = PermissionGate::new(
        tools.sensitive_names(),
        &config.default_approved_tools,
        Box::new(StdinConfirm),
        working_dir,
    );
    let options = TurnOptions {
        model: cli.model,
        max_tokens: cli.max_tokens,
        max_tool_rounds: config.max_tool_rounds,
    };
    let mut session = Session::new(Box::new(client), tools, gate, options);

    if !query.is_empty() {
        let piped = read_piped_stdin()?;
        let text = compose_query(query, piped.as_deref());

        let mut renderer = if cli.print {
            StdoutRenderer::new().without_usage()
        } else {
            StdoutRenderer::new()
        };
        let outcome = session.submit(&text, &mut renderer).await;

        if cli.print {
            outcome?;
            return Ok(());
        }
        if let Err(e) = outcome {
            renderer.error(&e.to_string());
        }
    }

    chat::run_chat(&mut session).await
}

/// Everything on stdin when it is a pipe or file, `None` for a terminal.
fn read_piped_stdin() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin.lock().read_to_string(&mut buf)?;
    Ok(Some(buf))
}

/// Prefix the query with piped input, if there was any.
fn compose_query(query: &str, piped: Option<&str>) -> String {
    match piped {
        Some(input) if !input.trim().is_empty() => {
            format!("Piped input:\n{}\n\nQuery: {}", input, query)
        }
        _ => query.to_string(),
    }
}
