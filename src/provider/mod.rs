//! Model provider abstraction.
//!
//! [`ModelClient`] is the single capability the conversation loop needs:
//! send the history plus tool definitions, get the assistant's content
//! blocks back. [`AnthropicClient`] implements it over the Anthropic
//! Messages API.

mod anthropic;
mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use anthropic::AnthropicClient;
pub use client::{ModelClient, ProviderError, Usage};
