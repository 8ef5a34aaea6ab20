//! Liveness probe.

use async_trait::async_trait;

use crate::auth::CommandAction;
use crate::error::CommandError;
use crate::gateway::Invocation;
use crate::router::ConsoleDeps;

use super::Command;

/// Reply for a healthy console.
pub const STATUS_LINE: &str = "Console operational.";

pub struct HealthCommand;

#[async_trait]
impl Command for HealthCommand {
    fn name(&self) -> &str {
        "health-check"
    }

    fn description(&self) -> &str {
        "Check that the console is alive"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn action(&self) -> CommandAction {
        CommandAction::Health
    }

    fn defers(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        _invocation: &Invocation,
        _deps: &ConsoleDeps,
    ) -> Result<String, CommandError> {
        Ok(STATUS_LINE.to_string())
    }
}
