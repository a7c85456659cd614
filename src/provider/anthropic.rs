//! Anthropic Messages API client.
//!
//! Non-streaming `POST /v1/messages`. The conversation is serialized as-is
//! because [`Message`] already has the API's shape.

use serde_json::{json, Value};
use tracing::debug;

use super::client::{ModelClient, ModelResponse, ProviderError};
use crate::config::Config;
use crate::constants::ANTHROPIC_VERSION;
use crate::message::Message;
use crate::tools::ToolSpec;

/// A configured Anthropic client.
///
/// The model and max-token defaults come from [`Config`] at construction;
/// each request may override them.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    fn request_body(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Value {
        let mut body = json!({
            "model": model.unwrap_or(&self.model),
            "max_tokens": max_tokens.unwrap_or(self.max_tokens),
            "messages": messages,
        });
        if !tools.is_empty() {
            body["tools"] = json!(tools);
        }
        body
    }
}

/// Map a non-success HTTP status and body to a [`ProviderError`].
///
/// Anthropic errors look like `{"type":"error","error":{"type":..,"message":..}}`;
/// anything else is passed through as raw text.
fn error_from_status(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => ProviderError::Auth(message),
        _ => ProviderError::Api { status, message },
    }
}

#[async_trait::async_trait]
impl ModelClient for AnthropicClient {
    async fn send_messages(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<ModelResponse, ProviderError> {
        if messages.is_empty() {
            return Err(ProviderError::InvalidInput(
                "Messages must be a non-empty list".to_string(),
            ));
        }

        let url = format!("{}/v1/messages", self.base_url);
        let body = self.request_body(messages, tools, model, max_tokens);

        debug!(
            model = body["model"].as_str().unwrap_or_default(),
            messages = messages.len(),
            tools = tools.len(),
            "sending messages request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), &text));
        }

        let parsed: ModelResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        debug!(
            stop_reason = parsed.stop_reason.as_deref().unwrap_or("none"),
            blocks = parsed.content.len(),
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "received response"
        );
        Ok(parsed)
    }
}
