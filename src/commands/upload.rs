//! Artifact ingestion commands, one per upload category.

use async_trait::async_trait;

use crate::auth::CommandAction;
use crate::error::{CommandError, UploadError};
use crate::gateway::{Invocation, OutboundMessage};
use crate::ingest::{SanitizedFilename, UploadCategory, UploadRequest, claimed_extension_matches};
use crate::router::ConsoleDeps;

use super::Command;

/// Ingests one upload category; instantiated once per category at registry
/// build time.
pub struct UploadCommand {
    category: UploadCategory,
    name: &'static str,
    description: &'static str,
}

impl UploadCommand {
    pub fn new(category: UploadCategory) -> Self {
        let (name, description) = match category {
            UploadCategory::Mission => {
                ("upload-mission", "Upload a mission file for rebroadcast")
            }
            UploadCategory::Preset => {
                ("upload-preset", "Upload a mod preset for rebroadcast")
            }
        };
        Self {
            category,
            name,
            description,
        }
    }
}

#[async_trait]
impl Command for UploadCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file": {
                    "type": "string",
                    "format": "attachment",
                    "description": format!("File to upload (must end {})", self.category.extension())
                }
            },
            "required": ["file"]
        })
    }

    fn action(&self) -> CommandAction {
        CommandAction::Upload
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        deps: &ConsoleDeps,
    ) -> Result<String, CommandError> {
        let attachment = invocation
            .attachment
            .as_ref()
            .ok_or_else(|| CommandError::Validation("An attachment is required".to_string()))?;

        let request = UploadRequest {
            claimed_name: attachment.claimed_name.clone(),
            size: attachment.size,
            url: attachment.url.clone(),
            category: self.category,
        };

        // Cheap rejection on the claimed name, before the blob is fetched.
        if !claimed_extension_matches(&request.claimed_name, request.category) {
            return Err(UploadError::WrongExtension {
                expected: request.category.extension(),
            }
            .into());
        }

        // Re-checked on the sanitized name: sanitization must not have
        // dropped or altered the extension.
        let stored_name = SanitizedFilename::for_category(&request.claimed_name, request.category)?;

        let bytes = deps.fetcher.fetch(&request.url).await?;

        let path = deps
            .store
            .persist(request.category, &stored_name, &bytes)
            .await?;

        tracing::info!(
            category = request.category.label(),
            name = %stored_name,
            declared_size = request.size,
            size = bytes.len(),
            "Stored uploaded artifact"
        );

        // Public rebroadcast into the invocation channel, then the private
        // confirmation.
        invocation
            .origin
            .try_send(OutboundMessage::with_attachment(
                request.category.banner(),
                path,
            ))
            .await?;

        Ok(format!("Stored `{stored_name}`."))
    }
}
