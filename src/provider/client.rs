//! The model capability and its request/response types.

use serde::Deserialize;

use crate::message::{ContentBlock, Message};
use crate::tools::ToolSpec;

/// Token accounting reported with each response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn add(&mut self, other: &Usage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// One assistant response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    MalformedResponse(String),
}

/// Sends a conversation to a model.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `messages` with `tools` available.
    ///
    /// `model` and `max_tokens` override the client's configured defaults
    /// for this request. Fails with [`ProviderError::InvalidInput`] when
    /// `messages` is empty; every other failure is a transport, auth or API
    /// error. Nothing is retried.
    async fn send_messages(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<ModelResponse, ProviderError>;
}
