//! Message relay into a group channel.

use async_trait::async_trait;

use crate::auth::CommandAction;
use crate::error::CommandError;
use crate::gateway::{Invocation, OutboundMessage};
use crate::router::ConsoleDeps;

use super::Command;

pub struct RelayMessageCommand;

#[async_trait]
impl Command for RelayMessageCommand {
    fn name(&self) -> &str {
        "relay-message"
    }

    fn description(&self) -> &str {
        "Post a message to the specified channel or thread"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Message to post"
                },
                "channel": {
                    "type": "string",
                    "description": "Optional channel or thread (defaults to current)"
                }
            },
            "required": ["message"]
        })
    }

    fn action(&self) -> CommandAction {
        CommandAction::Relay
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        _deps: &ConsoleDeps,
    ) -> Result<String, CommandError> {
        let message = invocation
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| CommandError::Validation("A message is required".to_string()))?;

        let target = invocation.target.as_ref().unwrap_or(&invocation.origin);

        // Unsupported targets surface as a typed rejection; no partial send
        // is attempted.
        target.try_send(OutboundMessage::text(message)).await?;

        Ok(format!("Message delivered to {}.", target.label()))
    }
}
