// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for Prompt Architect

use thiserror::Error;

/// Result type alias for architect operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the architect library.
///
/// Every variant is recoverable: callers render the message and return
/// control to the session.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable configuration, most often the API key.
    ///
    /// Raised before any network call is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The model provider or the network failed.
    #[error("Service error: {0}")]
    Service(String),

    /// Malformed tabular upload.
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// Unparseable label, option or document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Wrong access secret.
    #[error("Access denied: {0}")]
    Auth(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML errors (configuration files)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a service error
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Create an input format error
    pub fn input_format(msg: impl Into<String>) -> Self {
        Self::InputFormat(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// True when the error was raised before contacting the provider.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// True for provider and network failures.
    #[inline]
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::InputFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("Need API key");
        assert_eq!(err.to_string(), "Configuration error: Need API key");

        let err = Error::service("timeout");
        assert_eq!(err.to_string(), "Service error: timeout");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::configuration("x").is_configuration_error());
        assert!(!Error::configuration("x").is_service_error());
        assert!(Error::service("x").is_service_error());
        assert!(!Error::input_format("x").is_service_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
