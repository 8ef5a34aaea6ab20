//! Error types for the console, one enum per domain.
//!
//! Command handlers converge on [`CommandError`]; the router turns every
//! variant into exactly one private reply and picks the log level from the
//! error class, so no invocation failure ever reaches the event loop.

use std::path::PathBuf;

/// Errors raised while resolving configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidVar { var: String, reason: String },
}

/// Errors crossing the gateway boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The target exists but does not accept messages. This is the typed
    /// rejection for the capability check, not a transport failure.
    #[error("Target '{target}' does not accept messages")]
    Unsupported { target: String },

    #[error("Failed to send to '{target}': {reason}")]
    SendFailed { target: String, reason: String },

    #[error("Failed to acknowledge invocation: {reason}")]
    AckFailed { reason: String },
}

/// Errors from the container runtime bridge.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// No usable connection to the runtime daemon. Once the bridge starts
    /// degraded it stays degraded for the life of the process.
    #[error("container runtime unavailable ({reason})")]
    Unavailable { reason: String },

    /// The daemon answered the ping at startup but a query failed.
    #[error("container query failed ({reason})")]
    Query { reason: String },
}

/// Errors from the upload ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File name must end with `{expected}`")]
    WrongExtension { expected: &'static str },

    #[error("File name is empty after sanitization")]
    EmptyName,

    #[error("A file named `{name}` is already stored")]
    AlreadyExists { name: String },

    #[error("Failed to fetch attachment from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by command handlers to the router.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Malformed or missing command input. Reported privately, never logged
    /// as a system failure.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
