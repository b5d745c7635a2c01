//! Error types for the MidCity Utilities to Home Assistant forwarder.
//!
//! This module defines typed errors for the different components of the application,
//! so the poll loop can tell a bad login from a failed fetch or a rejected publish.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Portal login and fetch errors
    #[error("portal error")]
    Portal(#[from] PortalError),

    /// Home Assistant publishing errors
    #[error("publish error")]
    Publish(#[from] PublishError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("failed to read options file {path}: {message}")]
    Read { path: String, message: String },

    /// Options file is not valid JSON for the expected shape
    #[error("failed to parse options: {0}")]
    Parse(String),

    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// MidCity portal communication errors.
#[derive(Error, Debug)]
pub enum PortalError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Login answered with anything but the expected success body
    #[error("login failed: unexpected response (status {status})")]
    AuthFailed { status: u16 },

    /// Server returned an error status
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Local I/O failed (debug page dump)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Home Assistant publishing errors.
#[derive(Error, Debug)]
pub enum PublishError {
    /// HTTP request to the Home Assistant API failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Home Assistant answered with a non-success status
    #[error("failed to update {entity_id} (status {status}): {message}")]
    Rejected {
        entity_id: String,
        status: u16,
        message: String,
    },

    /// MQTT client refused the publish request
    #[error("MQTT publish failed: {0}")]
    Mqtt(String),

    /// Payload serialization failed
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// HTML parsing errors.
///
/// The extraction pipeline never surfaces these; they are logged and the
/// affected strategy counts as a miss.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl ConfigError {
    /// Creates a new read error.
    pub fn read(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates a new options parse error.
    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }

    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PortalError {
    /// Creates a server error from HTTP status and response body.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        Self::ServerError {
            status: status.as_u16(),
            message: body,
        }
    }

    /// Returns true when the failure came from the login step.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailed { .. })
    }
}

impl PublishError {
    /// Creates a rejected error from the entity id, HTTP status and response body.
    pub fn rejected(entity_id: impl Into<String>, status: reqwest::StatusCode, body: String) -> Self {
        Self::Rejected {
            entity_id: entity_id.into(),
            status: status.as_u16(),
            message: body,
        }
    }

    /// Creates an MQTT error.
    pub fn mqtt(err: impl std::fmt::Display) -> Self {
        Self::Mqtt(err.to_string())
    }
}

impl ParseError {
    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }
}
