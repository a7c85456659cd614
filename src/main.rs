//! Entry point for openclaude, a terminal coding agent backed by Claude.
//!
//! Loads environment variables, sets up logging, parses CLI arguments via
//! [`cli`] and hands off to [`cli::run`].

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod credentials;
mod diff;
mod format;
mod message;
mod output;
mod permissions;
mod provider;
mod session;
mod tools;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never mix with model output on stdout.
/// Verbosity comes from `OPENCLAUDE_LOG` (e.g. `OPENCLAUDE_LOG=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = cli::parse();
    cli::run(cli).await
}
