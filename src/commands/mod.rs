//! The command surface: a declarative registry consulted by the router.
//!
//! Each command declares its name, description, parameter schema, and the
//! authorization action the policy evaluates before its handler runs. The
//! registry is built once at startup and never mutated afterwards; the
//! gateway collaborator reads the schemas when registering the command set
//! with the remote platform.

mod containers;
mod health;
mod relay;
mod upload;

pub use containers::ListContainersCommand;
pub use health::{HealthCommand, STATUS_LINE};
pub use relay::RelayMessageCommand;
pub use upload::UploadCommand;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::CommandAction;
use crate::error::CommandError;
use crate::gateway::Invocation;
use crate::ingest::UploadCategory;
use crate::router::ConsoleDeps;

/// A single operator command.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the command parameters, for platform registration.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Action the authorization policy evaluates before execution.
    fn action(&self) -> CommandAction;

    /// Whether the router must send the provisional acknowledgment before
    /// any check runs. Unprivileged probes reply directly instead.
    fn defers(&self) -> bool {
        true
    }

    /// Run the command. Returns the private terminal reply text; public
    /// side effects go through the invocation's targets.
    async fn execute(
        &self,
        invocation: &Invocation,
        deps: &ConsoleDeps,
    ) -> Result<String, CommandError>;
}

/// Immutable name → command table.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Build the full builtin command set.
    pub fn builtin() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(HealthCommand),
            Arc::new(RelayMessageCommand),
            Arc::new(UploadCommand::new(UploadCategory::Mission)),
            Arc::new(UploadCommand::new(UploadCategory::Preset)),
            Arc::new(ListContainersCommand),
        ];

        Self {
            commands: commands
                .into_iter()
                .map(|c| (c.name().to_string(), c))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }
}
