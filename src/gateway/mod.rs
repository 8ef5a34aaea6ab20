//! Gateway boundary types.
//!
//! The network session itself (connecting, heartbeats, command-metadata
//! registration, presence) belongs to an external collaborator. The router
//! only sees what is defined here: an [`Invocation`] snapshot to act on, a
//! [`Responder`] for the reply lifecycle, and [`MessageTarget`]s for
//! delivery into channels.

mod local;

pub use local::LocalGateway;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::{Caller, CommunityId};
use crate::error::GatewayError;

/// A message posted into a channel.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub text: String,
    /// Stored file to attach, if any.
    pub attachment: Option<PathBuf>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(text: impl Into<String>, path: PathBuf) -> Self {
        Self {
            text: text.into(),
            attachment: Some(path),
        }
    }
}

/// Capability interface for anything that can receive messages.
///
/// Delivery is a capability check, not a type check: a target that exists
/// but cannot receive returns [`GatewayError::Unsupported`] instead of
/// crashing the handler.
#[async_trait]
pub trait MessageTarget: Send + Sync {
    /// Human-readable label for replies and logs.
    fn label(&self) -> String;

    async fn try_send(&self, message: OutboundMessage) -> Result<(), GatewayError>;
}

/// Untrusted attachment metadata offered with an upload command.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub claimed_name: String,
    pub size: u64,
    pub url: String,
}

/// One inbound structured command, snapshotted at the gateway edge.
///
/// The caller's roles and channel permissions are resolved by the gateway
/// before the router sees the invocation; nothing in the core queries the
/// platform again.
pub struct Invocation {
    pub command: String,
    pub caller: Caller,
    /// Community the invocation originated in; `None` for direct messages.
    pub community: Option<CommunityId>,
    /// Channel the invocation was made from.
    pub origin: Arc<dyn MessageTarget>,
    /// Explicitly named alternate target, for commands that accept one.
    pub target: Option<Arc<dyn MessageTarget>>,
    /// Free-text argument (relay message body).
    pub message: Option<String>,
    pub attachment: Option<Attachment>,
}

/// Reply lifecycle for a single invocation.
///
/// The remote platform expects a prompt provisional acknowledgment while the
/// real work proceeds; `defer` sends it. Terminal replies are private to the
/// caller, and the router sends exactly one.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn defer(&self) -> Result<(), GatewayError>;

    async fn reply_private(&self, text: &str) -> Result<(), GatewayError>;
}
