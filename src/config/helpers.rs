//! Environment lookup helpers shared by the config sections.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Read a required variable; a missing or blank value is an error.
pub(crate) fn required_env(var: &str) -> Result<String, ConfigError> {
    optional_env(var).ok_or_else(|| ConfigError::MissingVar(var.to_string()))
}

/// Read an optional variable, treating blank values as unset.
pub(crate) fn optional_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Read an optional string with a default.
pub(crate) fn parse_string_env(var: &str, default: &str) -> String {
    optional_env(var).unwrap_or_else(|| default.to_string())
}

/// Read an optional path with a default.
pub(crate) fn parse_path_env(var: &str, default: &str) -> PathBuf {
    optional_env(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Read an optional boolean with a default.
pub(crate) fn parse_bool_env(var: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(var) {
        None => Ok(default),
        Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{value}'"),
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for truthy in ["1", "true", "YES", "On", " true "] {
            assert_eq!(parse_bool(truthy), Some(true), "{truthy}");
        }
        for falsy in ["0", "false", "NO", "Off"] {
            assert_eq!(parse_bool(falsy), Some(false), "{falsy}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }
}
