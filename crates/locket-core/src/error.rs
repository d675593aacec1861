//! Error types for the Locket library.

use thiserror::Error;

/// A shared error type for the entire Locket library.
///
/// Every variant carries a message that is already human-readable; the
/// stores surface `err.to_string()` directly to the UI, so no variant may
/// render an empty or transport-internal string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocketError {
    /// Transport-level failure (unreachable host, timeout)
    #[error("{message}")]
    Network { message: String },

    /// 4xx/5xx response; message normalized from the response body
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Persistent storage read/write failure
    #[error("Storage error: {message}")]
    Persistence { message: String },

    /// Malformed response body or persisted snapshot
    #[error("{message}")]
    Serialization { message: String },

    /// Superseded in-flight request; resolves as a silent no-op, never
    /// surfaced to callers as a failure
    #[error("Request cancelled")]
    Cancelled,

    /// An operation that requires a session token was invoked without one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LocketError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
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

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this is a Server error
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Check if this is a Cancelled error
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a Persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LocketError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LocketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LocketError>`.
pub type Result<T> = std::result::Result<T, LocketError>;
