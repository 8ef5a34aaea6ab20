//! Caller snapshots and the authorization policy.

mod policy;

pub use policy::{ADMIN_ROLE, ELEVATED_ROLE, AuthorizationDecision, CommandAction, DenialReason, authorize};

/// Identifier of a community (deployment context) on the gateway side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommunityId(String);

impl CommunityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Effective permission flags of a caller in one channel context.
///
/// Resolved by the gateway collaborator at invocation time; the policy never
/// queries the platform itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelPermissions {
    pub send_messages: bool,
    pub administrator: bool,
}

/// Immutable snapshot of the invoking operator, taken once per invocation.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub display_name: String,
    /// Role names held in the current community.
    pub roles: Vec<String>,
    pub permissions: ChannelPermissions,
}

impl Caller {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
