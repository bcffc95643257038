//! Error handling for the portal test harness
//!
//! None of these errors are retried internally. They propagate to the calling
//! test, which is expected to fail on them.

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Main error type for the portal test harness
#[derive(Error, Debug)]
pub enum HarnessError {
    /// HTTP status differed from the declared expectation
    #[error(
        "API call failed for {method} {url}. Expected status: {expected}, Actual status: {actual}. Response body: {body}"
    )]
    StatusMismatch {
        method: String,
        url: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    /// Named lookup found no match
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// No bearer token from the caller, the service, or the gateway
    #[error("No auth token available for {operation}")]
    AuthMissing { operation: String },

    /// Network-level failure from the HTTP stack
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not decode into the requested type
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request payload could not be serialized
    #[error("Failed to encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl HarnessError {
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        HarnessError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn auth_missing(operation: impl Into<String>) -> Self {
        HarnessError::AuthMissing {
            operation: operation.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        HarnessError::Config {
            message: message.into(),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        HarnessError::Decode {
            context: context.into(),
            source,
        }
    }

    pub fn encode(context: impl Into<String>, source: serde_json::Error) -> Self {
        HarnessError::Encode {
            context: context.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HarnessError::NotFound { .. })
    }

    pub fn is_auth_missing(&self) -> bool {
        matches!(self, HarnessError::AuthMissing { .. })
    }

    /// `(expected, actual)` for a status mismatch
    pub fn status_mismatch(&self) -> Option<(u16, u16)> {
        match self {
            HarnessError::StatusMismatch {
                expected, actual, ..
            } => Some((*expected, *actual)),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for HarnessError {
    fn from(err: config::ConfigError) -> Self {
        HarnessError::config(err.to_string())
    }
}
