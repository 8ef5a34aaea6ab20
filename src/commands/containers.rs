//! Administrative container status query.

use async_trait::async_trait;

use crate::auth::CommandAction;
use crate::error::CommandError;
use crate::gateway::Invocation;
use crate::router::ConsoleDeps;
use crate::runtime::render_report;

use super::Command;

pub struct ListContainersCommand;

#[async_trait]
impl Command for ListContainersCommand {
    fn name(&self) -> &str {
        "list-containers"
    }

    fn description(&self) -> &str {
        "List the running workload containers"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn action(&self) -> CommandAction {
        CommandAction::AdminQuery
    }

    async fn execute(
        &self,
        _invocation: &Invocation,
        deps: &ConsoleDeps,
    ) -> Result<String, CommandError> {
        // Rendering happens only after the whole query succeeded; a failure
        // never produces a partial report.
        let records = deps.runtime.list_workloads().await?;
        Ok(render_report(&records))
    }
}
