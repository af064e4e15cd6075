//! Error types for catadmin.

use thiserror::Error;

/// A shared error type for every catadmin crate.
///
/// Variants mirror the failure classes an admin screen has to distinguish:
/// backend rejections, expired sessions, transport failures, and local
/// storage/configuration problems.
#[derive(Error, Debug, Clone)]
pub enum AdminError {
    /// The backend rejected the request (validation, invalid credentials, ...).
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered 401. The local session has already been cleared.
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// Transport failure (connection refused, timeout, DNS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable session storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Input rejected locally before any request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The category list has a parent cycle or a duplicate id at `id`.
    #[error("Category hierarchy is corrupt at category {id}")]
    CorruptHierarchy { id: i64 },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an Unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the backend reported the session as expired
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// Check if this is a backend rejection
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a NotFound error (either local or a backend 404)
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// The HTTP status attached to this error, if it came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthenticated { .. } => Some(401),
            _ => None,
        }
    }

    /// Message suitable for an inline error banner.
    ///
    /// Backend errors show the server's `error.message`; everything else shows
    /// `fallback`, so transport noise never reaches the screen.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthenticated { message }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdminError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AdminError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, AdminError>`.
pub type Result<T> = std::result::Result<T, AdminError>;
