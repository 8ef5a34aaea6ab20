//! The authorization policy: a pure decision function over a caller
//! snapshot.
//!
//! Rules are evaluated in a fixed order and the first failing rule wins.
//! Role names and permission flags are layered: a renamed or duplicated role
//! alone never grants access, and neither does permission drift.

use super::{Caller, CommunityId};

/// Community role granting relay and upload privileges.
pub const ELEVATED_ROLE: &str = "Zeus";

/// Community role required for administrative status queries.
pub const ADMIN_ROLE: &str = "Admin";

/// What a command is about to do, for authorization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Unprivileged liveness probe.
    Health,
    /// Post a message into a channel on the caller's behalf.
    Relay,
    /// Ingest and rebroadcast an artifact file.
    Upload,
    /// Query the container runtime. Home community only.
    AdminQuery,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    Deny(DenialReason),
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Why a command was denied. Each reason renders an operator-facing message
/// naming the gate that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenialReason {
    #[error("you lack the `{permission}` permission in the target channel")]
    InsufficientChannelPermission { permission: &'static str },

    #[error("the `{role}` role is required")]
    MissingRequiredRole { role: &'static str },

    /// Administrative commands exist only in the designated deployment
    /// context. The message deliberately reveals nothing about the role
    /// requirements.
    #[error("this command is not available here")]
    WrongDeploymentTarget,
}

/// Decide whether `caller` may perform `action`.
///
/// `invoked_in` is the community the invocation originated from (`None` for
/// direct messages); `home` is the designated deployment context. Pure over
/// the snapshot: no I/O, safe to call at any rate.
pub fn authorize(
    action: CommandAction,
    caller: &Caller,
    invoked_in: Option<&CommunityId>,
    home: &CommunityId,
) -> AuthorizationDecision {
    use AuthorizationDecision::{Allow, Deny};

    match action {
        CommandAction::Health => Allow,

        CommandAction::Relay => {
            // Channel permission before role, so the operator learns which
            // gate failed.
            if !caller.permissions.send_messages {
                return Deny(DenialReason::InsufficientChannelPermission {
                    permission: "send-messages",
                });
            }
            if !caller.has_role(ELEVATED_ROLE) {
                return Deny(DenialReason::MissingRequiredRole {
                    role: ELEVATED_ROLE,
                });
            }
            Allow
        }

        CommandAction::Upload => {
            // Uploads rebroadcast into the invocation's own channel, so no
            // independent channel-permission check applies.
            if !caller.has_role(ELEVATED_ROLE) {
                return Deny(DenialReason::MissingRequiredRole {
                    role: ELEVATED_ROLE,
                });
            }
            Allow
        }

        CommandAction::AdminQuery => {
            // Deployment gate first, before any role or permission check.
            if invoked_in != Some(home) {
                return Deny(DenialReason::WrongDeploymentTarget);
            }
            if !caller.has_role(ADMIN_ROLE) {
                return Deny(DenialReason::MissingRequiredRole { role: ADMIN_ROLE });
            }
            if !caller.permissions.administrator {
                return Deny(DenialReason::InsufficientChannelPermission {
                    permission: "administrator",
                });
            }
            Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ChannelPermissions;

    fn caller(roles: &[&str], permissions: ChannelPermissions) -> Caller {
        Caller {
            id: "1".to_string(),
            display_name: "op".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions,
        }
    }

    fn home() -> CommunityId {
        CommunityId::new("home")
    }

    #[test]
    fn health_is_always_allowed() {
        let c = caller(&[], ChannelPermissions::default());
        assert!(authorize(CommandAction::Health, &c, None, &home()).is_allowed());
    }

    #[test]
    fn relay_checks_permission_before_role() {
        // No send permission and no role: the permission failure is the one
        // reported.
        let c = caller(&[], ChannelPermissions::default());
        assert_eq!(
            authorize(CommandAction::Relay, &c, Some(&home()), &home()),
            AuthorizationDecision::Deny(DenialReason::InsufficientChannelPermission {
                permission: "send-messages",
            })
        );

        // Send permission but no elevated role: the role failure surfaces
        // only after the permission check passed.
        let c = caller(
            &["Member"],
            ChannelPermissions {
                send_messages: true,
                administrator: false,
            },
        );
        assert_eq!(
            authorize(CommandAction::Relay, &c, Some(&home()), &home()),
            AuthorizationDecision::Deny(DenialReason::MissingRequiredRole {
                role: ELEVATED_ROLE,
            })
        );
    }

    #[test]
    fn relay_requires_both_gates() {
        let c = caller(
            &[ELEVATED_ROLE],
            ChannelPermissions {
                send_messages: true,
                administrator: false,
            },
        );
        assert!(authorize(CommandAction::Relay, &c, Some(&home()), &home()).is_allowed());

        // Role without permission still fails.
        let c = caller(&[ELEVATED_ROLE], ChannelPermissions::default());
        assert!(!authorize(CommandAction::Relay, &c, Some(&home()), &home()).is_allowed());
    }

    #[test]
    fn upload_ignores_channel_permissions() {
        // Full channel permissions without the role: denied.
        let c = caller(
            &[],
            ChannelPermissions {
                send_messages: true,
                administrator: true,
            },
        );
        assert_eq!(
            authorize(CommandAction::Upload, &c, Some(&home()), &home()),
            AuthorizationDecision::Deny(DenialReason::MissingRequiredRole {
                role: ELEVATED_ROLE,
            })
        );

        // The role with no channel permissions at all: allowed.
        let c = caller(&[ELEVATED_ROLE], ChannelPermissions::default());
        assert!(authorize(CommandAction::Upload, &c, Some(&home()), &home()).is_allowed());
    }

    #[test]
    fn admin_query_deployment_gate_comes_first() {
        // Even a fully privileged caller is rejected outside the home
        // community, with the context reason rather than a role reason.
        let c = caller(
            &[ADMIN_ROLE, ELEVATED_ROLE],
            ChannelPermissions {
                send_messages: true,
                administrator: true,
            },
        );
        let elsewhere = CommunityId::new("elsewhere");
        assert_eq!(
            authorize(CommandAction::AdminQuery, &c, Some(&elsewhere), &home()),
            AuthorizationDecision::Deny(DenialReason::WrongDeploymentTarget)
        );
        assert_eq!(
            authorize(CommandAction::AdminQuery, &c, None, &home()),
            AuthorizationDecision::Deny(DenialReason::WrongDeploymentTarget)
        );
    }

    #[test]
    fn admin_query_layers_role_and_permission() {
        let in_home = Some(home());

        let c = caller(&[ADMIN_ROLE], ChannelPermissions::default());
        assert_eq!(
            authorize(CommandAction::AdminQuery, &c, in_home.as_ref(), &home()),
            AuthorizationDecision::Deny(DenialReason::InsufficientChannelPermission {
                permission: "administrator",
            })
        );

        let c = caller(
            &[],
            ChannelPermissions {
                send_messages: false,
                administrator: true,
            },
        );
        assert_eq!(
            authorize(CommandAction::AdminQuery, &c, in_home.as_ref(), &home()),
            AuthorizationDecision::Deny(DenialReason::MissingRequiredRole { role: ADMIN_ROLE })
        );

        let c = caller(
            &[ADMIN_ROLE],
            ChannelPermissions {
                send_messages: false,
                administrator: true,
            },
        );
        assert!(authorize(CommandAction::AdminQuery, &c, in_home.as_ref(), &home()).is_allowed());
    }
}
