//! Output rendering abstraction.
//!
//! The conversation loop reports what happens through the [`Renderer`]
//! trait, keeping terminal details out of the core. [`StdoutRenderer`]
//! prints to the terminal; tests use a recording renderer instead.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::constants::TOOL_RESULT_PREVIEW_CHARS;
use crate::format;
use crate::provider::Usage;

/// Sink for display events produced during a turn.
pub trait Renderer {
    /// A model request is about to be sent.
    fn request_started(&mut self) {}

    /// The model request finished (successfully or not).
    fn request_finished(&mut self) {}

    /// A text block from the assistant.
    fn assistant_text(&mut self, text: &str);

    /// The assistant asked to run a tool.
    fn tool_use(&mut self, name: &str);

    /// A tool call finished (or was denied) with this result.
    fn tool_result(&mut self, name: &str, result: &str);

    /// Token accounting for one model response.
    fn usage(&mut self, _usage: &Usage) {}

    /// Called when a turn fails.
    fn error(&mut self, err: &str);
}

/// Renders to the terminal with colors and a spinner while waiting.
pub struct StdoutRenderer {
    spinner: Option<ProgressBar>,
    show_usage: bool,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self {
            spinner: None,
            show_usage: true,
        }
    }

    /// Suppress the per-response token line (used for one-shot `--print` runs).
    pub fn without_usage(mut self) -> Self {
        self.show_usage = false;
        self
    }
}

impl Renderer for StdoutRenderer {
    fn request_started(&mut self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Processing...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn request_finished(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn assistant_text(&mut self, text: &str) {
        println!("{}", "claude:".cyan().bold());
        println!("{}", format::render_markdown_lite(text));
        println!();
    }

    fn tool_use(&mut self, name: &str) {
        println!("{} {}", "Using tool:".yellow().bold(), name);
    }

    fn tool_result(&mut self, name: &str, result: &str) {
        let shown = format::truncate_chars(result, TOOL_RESULT_PREVIEW_CHARS);
        let label = format!("[{}]", name);
        if result.starts_with("Error:") || result == crate::constants::PERMISSION_DENIED {
            println!("{} {}", label.red(), shown);
        } else {
            println!("{} {}", label.green(), shown.dimmed());
        }
        println!();
    }

    fn usage(&mut self, usage: &Usage) {
        if self.show_usage {
            println!(
                "{}",
                format!(
                    "[{} in / {} out tokens]",
                    usage.input_tokens, usage.output_tokens
                )
                .dimmed()
            );
        }
    }

    fn error(&mut self, err: &str) {
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

impl Drop for StdoutRenderer {
    fn drop(&mut self) {
        self.request_finished();
    }
}
