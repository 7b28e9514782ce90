//! Error types for TalentDesk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole client core.
///
/// Remote failures are split by origin: the transport never produced a
/// response (`Transport`, `Timeout`), the server answered with a failure
/// status (`Server`), or the server rejected the credential (`Unauthorized`).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeskError {
    /// Network failure, no server response
    #[error("{message}")]
    Transport { message: String },

    /// Request exceeded the pipeline time bound
    #[error("timeout of {after_ms}ms exceeded")]
    Timeout { after_ms: u64 },

    /// Non-2xx response other than 401
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 401 response; the session has already been terminated when this is seen
    #[error("{message}")]
    Unauthorized { message: String },

    /// IO error (durable storage)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage error (locking, path resolution)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if the failure happened before any server response.
    ///
    /// Timeouts count as transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Check if the server reported the failure
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Human-readable text recorded in a store's `error` slot.
    ///
    /// Server-reported failures yield the server's message verbatim; every
    /// other variant yields its display text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. }
            | Self::Unauthorized { message }
            | Self::Transport { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DeskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DeskError>`.
pub type Result<T> = std::result::Result<T, DeskError>;
