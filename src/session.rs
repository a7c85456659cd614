//! An interactive conversation session.
//!
//! A [`Session`] owns everything one conversation needs: the model client,
//! the tool registry, the permission gate and the message history. History
//! lives in memory only and is gone when the process exits.

use crate::agent::{self, TurnError, TurnOptions, TurnSummary};
use crate::message::Message;
use crate::output::Renderer;
use crate::permissions::PermissionGate;
use crate::provider::ModelClient;
use crate::tools::ToolRegistry;

pub struct Session {
    client: Box<dyn ModelClient>,
    tools: ToolRegistry,
    gate: PermissionGate,
    messages: Vec<Message>,
    options: TurnOptions,
}

impl Session {
    pub fn new(
        client: Box<dyn ModelClient>,
        tools: ToolRegistry,
        gate: PermissionGate,
        options: TurnOptions,
    ) -> Self {
        Self {
            client,
            tools,
            gate,
            messages: Vec::new(),
            options,
        }
    }

    /// Append `text` as a user message and run the turn it starts.
    ///
    /// The history keeps whatever the turn managed to append, even when the
    /// turn fails, so the next submission continues the same conversation.
    pub async fn submit(
        &mut self,
        text: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<TurnSummary, TurnError> {
        self.messages.push(Message::user(text));
        agent::run_turn(
            self.client.as_ref(),
            &mut self.messages,
            &self.tools,
            &mut self.gate,
            renderer,
            &self.options,
        )
        .await
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn gate_mut(&mut self) -> &mut PermissionGate {
        &mut self.gate
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
