//! Per-invocation dispatch: acknowledgment, authorization gate, execution,
//! and exactly one terminal reply.

use std::sync::Arc;

use crate::auth::{self, AuthorizationDecision, CommunityId};
use crate::commands::CommandRegistry;
use crate::error::{CommandError, GatewayError};
use crate::gateway::{Invocation, Responder};
use crate::ingest::{Fetcher, UploadStore};
use crate::runtime::RuntimeBridge;

/// Shared collaborators handed to command handlers. Built once at startup;
/// read-only afterwards.
pub struct ConsoleDeps {
    pub home_community: CommunityId,
    pub runtime: RuntimeBridge,
    pub store: UploadStore,
    pub fetcher: Arc<dyn Fetcher>,
}

/// Dispatches inbound invocations to their handlers.
pub struct Router {
    registry: CommandRegistry,
    deps: ConsoleDeps,
}

impl Router {
    pub fn new(registry: CommandRegistry, deps: ConsoleDeps) -> Self {
        Self { registry, deps }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle one invocation to completion.
    ///
    /// Never propagates an error: every outcome becomes the invocation's
    /// single terminal reply, and a failed reply delivery is only logged, so
    /// one bad invocation cannot take down the event loop.
    pub async fn dispatch(&self, invocation: Invocation, responder: Arc<dyn Responder>) {
        let command_name = invocation.command.clone();
        let caller_name = invocation.caller.display_name.clone();

        let Some(command) = self.registry.get(&command_name) else {
            let error = CommandError::UnknownCommand(command_name.clone());
            log_command_error(&command_name, &caller_name, &error);
            reply(&responder, &user_message(&error)).await;
            return;
        };

        // Provisional acknowledgment before any check; the remote platform
        // expects it within its deadline.
        if command.defers() {
            if let Err(e) = responder.defer().await {
                tracing::warn!(
                    command = %command_name,
                    error = %e,
                    "Failed to acknowledge invocation"
                );
                return;
            }
        }

        let decision = auth::authorize(
            command.action(),
            &invocation.caller,
            invocation.community.as_ref(),
            &self.deps.home_community,
        );

        if let AuthorizationDecision::Deny(reason) = decision {
            tracing::info!(
                command = %command_name,
                caller = %caller_name,
                reason = %reason,
                "Command denied"
            );
            reply(&responder, &format!("Denied: {reason}.")).await;
            return;
        }

        match command.execute(&invocation, &self.deps).await {
            Ok(text) => reply(&responder, &text).await,
            Err(e) => {
                log_command_error(&command_name, &caller_name, &e);
                reply(&responder, &user_message(&e)).await;
            }
        }
    }
}

async fn reply(responder: &Arc<dyn Responder>, text: &str) {
    if let Err(e) = responder.reply_private(text).await {
        tracing::warn!(error = %e, "Failed to deliver reply");
    }
}

/// Log level per the error taxonomy: validation errors are not system
/// failures, runtime-bridge failures are transient and worth a warning.
fn log_command_error(command: &str, caller: &str, error: &CommandError) {
    match error {
        CommandError::Validation(_) | CommandError::Upload(_) | CommandError::UnknownCommand(_) => {
            tracing::debug!(command, caller, error = %error, "Command rejected");
        }
        CommandError::Runtime(_) => {
            tracing::warn!(command, caller, error = %error, "Runtime bridge failure");
        }
        CommandError::Gateway(_) => {
            tracing::info!(command, caller, error = %error, "Gateway delivery failure");
        }
    }
}

/// Operator-facing reply for a failed command.
fn user_message(error: &CommandError) -> String {
    match error {
        CommandError::Gateway(GatewayError::Unsupported { target }) => {
            format!("Cannot deliver to '{target}': it does not accept messages.")
        }
        CommandError::Runtime(e) => format!("Container report failed: {e}."),
        other => format!("{other}."),
    }
}
