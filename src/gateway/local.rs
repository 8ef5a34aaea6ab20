//! Line-oriented local gateway for development.
//!
//! Reads commands from stdin and prints deliveries and replies, with the
//! operator identity taken from configuration. It produces the same
//! `Invocation` snapshots the router sees behind a platform gateway, which
//! also makes it the harness the integration tests drive.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::auth::{Caller, ChannelPermissions, CommunityId};
use crate::config::LocalOperatorConfig;
use crate::error::GatewayError;
use crate::gateway::{Attachment, Invocation, MessageTarget, OutboundMessage, Responder};
use crate::router::Router;

const USAGE: &str = "commands: health-check | relay-message <text> | \
                     upload-mission <url> [name] | upload-preset <url> [name] | \
                     list-containers | exit";

/// Prints publicly delivered messages to stdout.
struct ConsoleTarget {
    label: String,
}

#[async_trait]
impl MessageTarget for ConsoleTarget {
    fn label(&self) -> String {
        self.label.clone()
    }

    async fn try_send(&self, message: OutboundMessage) -> Result<(), GatewayError> {
        match message.attachment {
            Some(path) => println!("[#{}] {} {}", self.label, message.text, path.display()),
            None => println!("[#{}] {}", self.label, message.text),
        }
        Ok(())
    }
}

/// Prints private replies to stdout.
struct ConsoleResponder;

#[async_trait]
impl Responder for ConsoleResponder {
    async fn defer(&self) -> Result<(), GatewayError> {
        tracing::debug!("invocation acknowledged");
        Ok(())
    }

    async fn reply_private(&self, text: &str) -> Result<(), GatewayError> {
        println!("(private) {text}");
        Ok(())
    }
}

/// Local console gateway.
pub struct LocalGateway {
    operator: LocalOperatorConfig,
    home: CommunityId,
}

impl LocalGateway {
    pub fn new(operator: LocalOperatorConfig, home: CommunityId) -> Self {
        Self { operator, home }
    }

    /// Read commands from stdin until EOF or `exit`, dispatching each
    /// through the router as its own task.
    pub async fn run(&self, router: Arc<Router>) -> std::io::Result<()> {
        println!("{USAGE}");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "exit" || line == "quit" {
                break;
            }

            match self.parse(line) {
                Some(invocation) => {
                    let router = router.clone();
                    tokio::spawn(async move {
                        router.dispatch(invocation, Arc::new(ConsoleResponder)).await;
                    });
                }
                None => println!("(private) {USAGE}"),
            }
        }
        Ok(())
    }

    fn caller(&self) -> Caller {
        Caller {
            id: "local".to_string(),
            display_name: self.operator.name.clone(),
            roles: self.operator.roles.clone(),
            permissions: ChannelPermissions {
                send_messages: self.operator.send_messages,
                administrator: self.operator.administrator,
            },
        }
    }

    /// Parse one input line into an invocation. Returns `None` for lines
    /// whose required arguments are missing; unknown command names go
    /// through so the router answers them.
    fn parse(&self, line: &str) -> Option<Invocation> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?.to_string();
        let rest: Vec<&str> = parts.collect();

        let mut invocation = Invocation {
            command: command.clone(),
            caller: self.caller(),
            community: Some(self.home.clone()),
            origin: Arc::new(ConsoleTarget {
                label: "console".to_string(),
            }),
            target: None,
            message: None,
            attachment: None,
        };

        match command.as_str() {
            "relay-message" => {
                if rest.is_empty() {
                    return None;
                }
                invocation.message = Some(rest.join(" "));
            }
            "upload-mission" | "upload-preset" => {
                let url = rest.first()?.to_string();
                let claimed_name = match rest.get(1) {
                    Some(name) => name.to_string(),
                    // Default to the last URL segment, exactly as a platform
                    // gateway reports an attachment's claimed name.
                    None => url.rsplit('/').next().unwrap_or_default().to_string(),
                };
                invocation.attachment = Some(Attachment {
                    claimed_name,
                    size: 0,
                    url,
                });
            }
            _ => {}
        }

        Some(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> LocalGateway {
        LocalGateway::new(
            LocalOperatorConfig {
                name: "op".to_string(),
                roles: vec!["Zeus".to_string()],
                send_messages: true,
                administrator: false,
            },
            CommunityId::new("home"),
        )
    }

    #[test]
    fn parses_relay_with_message_body() {
        let inv = gateway().parse("relay-message hello out there").unwrap();
        assert_eq!(inv.command, "relay-message");
        assert_eq!(inv.message.as_deref(), Some("hello out there"));
        assert!(inv.attachment.is_none());
    }

    #[test]
    fn relay_without_body_is_rejected_at_parse() {
        assert!(gateway().parse("relay-message").is_none());
    }

    #[test]
    fn parses_upload_with_explicit_name() {
        let inv = gateway()
            .parse("upload-mission https://files.example/a.pbo op%20one.pbo")
            .unwrap();
        let attachment = inv.attachment.unwrap();
        assert_eq!(attachment.claimed_name, "op%20one.pbo");
        assert_eq!(attachment.url, "https://files.example/a.pbo");
    }

    #[test]
    fn upload_name_defaults_to_url_segment() {
        let inv = gateway()
            .parse("upload-preset https://files.example/mods/loadout.html")
            .unwrap();
        assert_eq!(inv.attachment.unwrap().claimed_name, "loadout.html");
    }

    #[test]
    fn unknown_commands_pass_through_to_the_router() {
        let inv = gateway().parse("frobnicate now").unwrap();
        assert_eq!(inv.command, "frobnicate");
    }

    #[test]
    fn caller_snapshot_reflects_operator_config() {
        let inv = gateway().parse("health-check").unwrap();
        assert!(inv.caller.has_role("Zeus"));
        assert!(inv.caller.permissions.send_messages);
        assert!(!inv.caller.permissions.administrator);
        assert_eq!(inv.community, Some(CommunityId::new("home")));
    }
}
