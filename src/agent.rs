//! The tool-use conversation loop.
//!
//! [`run_turn`] drives one user turn to completion: send the history, show
//! the whole reply, then run every requested tool through the permission
//! gate, append the results and send again, until the model answers without
//! asking for a tool.

use std::num::NonZeroUsize;
use tracing::{debug, info};

use crate::constants::PERMISSION_DENIED;
use crate::message::{ContentBlock, Message};
use crate::output::Renderer;
use crate::permissions::{Authorization, PermissionGate};
use crate::provider::{ModelClient, ProviderError, Usage};
use crate::tools::ToolRegistry;

/// Per-turn request settings.
#[derive(Debug, Clone, Default)]
pub struct TurnOptions {
    /// Overrides the client's configured model.
    pub model: Option<String>,
    /// Overrides the client's configured response limit.
    pub max_tokens: Option<u32>,
    /// Stop after this many model calls. `None` keeps going until the model
    /// stops asking for tools.
    pub max_tool_rounds: Option<NonZeroUsize>,
}

/// What a completed turn did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub rounds: usize,
    pub tool_calls: usize,
    pub usage: Usage,
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Model(#[from] ProviderError),

    #[error("Stopped after {0} tool rounds without a final answer")]
    RoundLimit(usize),
}

/// Run one turn against `messages`, which must already end with the user's
/// input.
///
/// Every tool request the model makes is answered with exactly one result
/// block carrying the same id, in request order, before the next model
/// call. A model error aborts the turn; tool failures and refusals do not,
/// they are reported back to the model as text.
pub async fn run_turn(
    client: &dyn ModelClient,
    messages: &mut Vec<Message>,
    tools: &ToolRegistry,
    gate: &mut PermissionGate,
    renderer: &mut dyn Renderer,
    options: &TurnOptions,
) -> Result<TurnSummary, TurnError> {
    let specs = tools.list_tools();
    let mut summary = TurnSummary::default();

    loop {
        summary.rounds += 1;
        debug!(round = summary.rounds, history = messages.len(), "requesting model response");

        renderer.request_started();
        let response = client
            .send_messages(
                messages,
                &specs,
                options.model.as_deref(),
                options.max_tokens,
            )
            .await;
        renderer.request_finished();
        let response = response?;

        summary.usage.add(&response.usage);
        renderer.usage(&response.usage);

        let assistant = Message::assistant(response.content);
        for block in &assistant.content {
            match block {
                ContentBlock::Text { text } => renderer.assistant_text(text),
                ContentBlock::ToolUse { name, .. } => renderer.tool_use(name),
                ContentBlock::ToolResult { .. } => {}
            }
        }

        let mut results = Vec::new();
        for call in assistant.tool_calls() {
            let result = match gate.authorize(call.name, call.input) {
                Authorization::Allowed => tools.execute(call.name, call.input).await,
                Authorization::Denied => PERMISSION_DENIED.to_string(),
            };
            debug!(tool = call.name, id = call.id, bytes = result.len(), "tool call finished");
            renderer.tool_result(call.name, &result);
            results.push(ContentBlock::tool_result(call.id, result));
        }

        // The API rejects empty assistant content anywhere but the last turn.
        if assistant.content.is_empty() {
            debug!(round = summary.rounds, "model returned no content");
        } else {
            messages.push(assistant);
        }

        if results.is_empty() {
            info!(
                rounds = summary.rounds,
                tool_calls = summary.tool_calls,
                input_tokens = summary.usage.input_tokens,
                output_tokens = summary.usage.output_tokens,
                "turn complete"
            );
            return Ok(summary);
        }

        summary.tool_calls += results.len();
        messages.push(Message::tool_results(results));

        if let Some(limit) = options.max_tool_rounds {
            if summary.rounds >= limit.get() {
                return Err(TurnError::RoundLimit(limit.get()));
            }
        }
    }
}
