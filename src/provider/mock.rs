//! Scripted model client for exercising the conversation loop without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{json, Value};

use super::client::{ModelClient, ModelResponse, ProviderError, Usage};
use crate::message::{ContentBlock, Message};
use crate::tools::ToolSpec;

/// What the loop sent on one call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

/// Returns queued responses in order and records every request.
///
/// When the script runs out it answers with a plain "done" text block.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response built from raw content blocks in API JSON form.
    pub fn then_blocks(self, blocks: Value) -> Self {
        let content: Vec<ContentBlock> =
            serde_json::from_value(blocks).expect("scripted blocks must be valid content");
        self.responses.lock().unwrap().push_back(Ok(ModelResponse {
            content,
            stop_reason: None,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }));
        self
    }

    pub fn then_text(self, text: &str) -> Self {
        self.then_blocks(json!([{"type": "text", "text": text}]))
    }

    pub fn then_error(self, err: ProviderError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, idx: usize) -> RecordedRequest {
        self.requests.lock().unwrap()[idx].clone()
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedClient {
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

        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
            model: model.map(String::from),
            max_tokens,
        });

        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ModelResponse {
                content: vec![ContentBlock::text("done")],
                stop_reason: Some("end_turn".to_string()),
                usage: Usage::default(),
            })
        })
    }
}
