//! Unified error types for bgnotify
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error from a push transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// HTTP error passed through from the cancellation call
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pushover is not configured (no API token or no destination keys)
    #[error("Pushover is not configured")]
    NotConfigured,

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown severity level name
    #[error("Unknown severity level: {0}")]
    UnknownLevel(String),

    /// Receipt token is empty or contains characters outside [A-Za-z0-9]
    #[error("Invalid receipt: {0:?}")]
    InvalidReceipt(String),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Every destination key set resolved to empty
    #[error("No destination keys configured (user_key, group_key, alarm_key, announcement_key)")]
    NoDestinationKeys,

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from a single push delivery
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered but refused the message
    #[error("Rejected with HTTP {status}: {errors}")]
    Rejected { status: u16, errors: String },

    /// The per-key send task panicked or was cancelled
    #[error("Send task failed: {0}")]
    TaskFailed(String),

    /// Dispatch was attempted outside a Tokio runtime
    #[error("No async runtime available: {0}")]
    NoRuntime(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::UnknownLevel("loud".to_string());
        assert_eq!(err.to_string(), "Unknown severity level: loud");
    }

    #[test]
    fn test_rejected_error_display() {
        let err = TransportError::Rejected {
            status: 400,
            errors: "user key is invalid".to_string(),
        };
        assert!(err.to_string().contains("HTTP 400"));
        assert!(err.to_string().contains("user key is invalid"));
    }

    #[test]
    fn test_missing_field_display() {
        let err = ConfigError::MissingField("pushover.api_token".to_string());
        assert!(err.to_string().contains("pushover.api_token"));
    }

    #[test]
    fn test_error_conversion() {
        let transport_err = TransportError::TaskFailed("cancelled".to_string());
        let app_err: AppError = transport_err.into();
        assert!(matches!(app_err, AppError::Transport(_)));
    }
}
