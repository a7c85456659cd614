//! Configuration for openclaude.
//!
//! Settings live in `config.json`, looked up first in the working
//! directory and then in the platform config path (e.g.
//! `~/.config/openclaude/config.json` on Linux). Missing or broken files
//! never stop the program; defaults are used instead.

mod loader;
mod paths;
mod types;

pub use types::Config;
