//! Error types for warungbook-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable codes for configuration failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    MissingField,
    InvalidValue,
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::MissingField => write!(f, "MISSING_FIELD"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format")]
    InvalidYaml,

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error occurred")]
    IoError,
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError => ConfigErrorCode::IoError,
        }
    }

    /// What the operator can do about it
    pub fn hints(&self) -> Vec<String> {
        match self {
            ConfigError::FileNotFound { .. } => vec![
                "Use --config to point at an existing file".to_string(),
                "Run with --generate-config > config.yaml for a starter file".to_string(),
            ],
            ConfigError::InvalidYaml => vec![
                "Compare the file with the output of --generate-config".to_string(),
            ],
            ConfigError::MissingField { field } => vec![format!("Add '{}' to the config file", field)],
            ConfigError::InvalidValue { field, reason } => vec![format!("Fix '{}': {}", field, reason)],
            ConfigError::IoError => vec!["Check that the config file is readable".to_string()],
        }
    }

    /// One-block report for the terminal: code, message, then hints
    pub fn report(&self) -> String {
        let mut out = format!("[{}] {}", self.code(), self);
        for hint in self.hints() {
            out.push_str("\n  hint: ");
            out.push_str(&hint);
        }
        out
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            reason: "Port must be greater than 0".to_string(),
        };
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert_eq!(
            err.report(),
            "[INVALID_VALUE] Invalid field value: server.port - Port must be greater than 0\n  hint: Fix 'server.port': Port must be greater than 0"
        );
    }

    #[test]
    fn test_yaml_error_points_at_generated_config() {
        let err = ConfigError::InvalidYaml;
        assert!(err.report().starts_with("[INVALID_YAML]"));
        assert!(err.hints()[0].contains("--generate-config"));
    }
}
