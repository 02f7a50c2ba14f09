//! Error types for the ordergate client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the ordergate crates.
///
/// Client operations never surface this type to the user directly; it is
/// folded into an [`OperationResult`](crate::OperationResult) at the edge.
/// Everything below that edge propagates it with `?`.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GatewayError {
    /// No response was obtained from the gateway (refused, reset, DNS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A request could not be built (e.g. a header value that cannot be encoded).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A response arrived but its body could not be decoded.
    #[error("Decode error: {format} - {message}")]
    Decode {
        format: String, // "JSON", "TOML"
        message: String,
    },

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an InvalidRequest error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a JSON Decode error
    pub fn json_decode(message: impl Into<String>) -> Self {
        Self::Decode {
            format: "JSON".to_string(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a Decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if the exchange failed before a usable response was obtained.
    ///
    /// Returns true for:
    /// - `Transport` errors
    /// - `InvalidRequest` errors (the request never left the client)
    /// - `Decode` errors on a response body
    ///
    /// All of these collapse to the same connectivity message for the user.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::InvalidRequest(_) | Self::Decode { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_decode(err.to_string())
    }
}

impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        Self::Decode {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, GatewayError>`.
pub type Result<T> = std::result::Result<T, GatewayError>;
