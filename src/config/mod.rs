//! Configuration for the console.
//!
//! Everything comes from environment variables, with `.env` support via
//! dotenvy. Each section resolves itself; the startup collaborator owns the
//! values and hands them to the core.

pub(crate) mod helpers;

use std::path::PathBuf;

use secrecy::SecretString;

use crate::auth::CommunityId;
use crate::error::ConfigError;

use self::helpers::{optional_env, parse_bool_env, parse_path_env, parse_string_env, required_env};

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub storage: StorageConfig,
    pub operator: LocalOperatorConfig,
}

impl Config {
    /// Load configuration from the environment (and `./.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Ok(Self {
            gateway: GatewayConfig::resolve()?,
            storage: StorageConfig::resolve(),
            operator: LocalOperatorConfig::resolve()?,
        })
    }
}

/// Gateway connection settings.
///
/// The token is consumed by the gateway collaborator, never by the core; the
/// home community id gates administrative commands.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: Option<SecretString>,
    pub home_community: CommunityId,
}

impl GatewayConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        Ok(Self {
            token: optional_env("GATEWAY_TOKEN").map(SecretString::new),
            home_community: CommunityId::new(required_env("HOME_COMMUNITY_ID")?),
        })
    }
}

/// Destination directories for ingested artifacts, one flat directory per
/// upload category. No metadata sidecar, no database.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub mission_dir: PathBuf,
    pub preset_dir: PathBuf,
}

impl StorageConfig {
    pub(crate) fn resolve() -> Self {
        Self {
            mission_dir: parse_path_env("MISSION_DIR", "store/missions"),
            preset_dir: parse_path_env("PRESET_DIR", "store/presets"),
        }
    }
}

/// Identity assumed by the local console gateway.
///
/// Only the dev harness reads this; a platform gateway resolves the caller
/// snapshot from the session instead.
#[derive(Debug, Clone)]
pub struct LocalOperatorConfig {
    pub name: String,
    pub roles: Vec<String>,
    pub send_messages: bool,
    pub administrator: bool,
}

impl LocalOperatorConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let roles = optional_env("LOCAL_OPERATOR_ROLES")
            .map(|s| {
                s.split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: parse_string_env("LOCAL_OPERATOR_NAME", "operator"),
            roles,
            send_messages: parse_bool_env("LOCAL_OPERATOR_SEND", true)?,
            administrator: parse_bool_env("LOCAL_OPERATOR_ADMIN", false)?,
        })
    }
}
