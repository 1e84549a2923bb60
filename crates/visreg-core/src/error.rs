//! Unified error types for the visreg scenario bridge

use thiserror::Error;

/// Unified error type for all visreg operations
#[derive(Error, Debug)]
pub enum VisregError {
    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Remote service errors
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("remote service unreachable: {0}")]
    Unreachable(String),

    #[error("invalid session parameters: {0}")]
    Validation(String),

    #[error("remote service error ({status}): {message}")]
    Remote { status: u16, message: String },

    // Lifecycle errors
    #[error("failed to open test session: {0}")]
    SessionOpen(String),

    #[error("failed to close test session: {0}")]
    SessionClose(String),

    // Command surface errors
    #[error("visual check failed: {0}")]
    Check(String),

    #[error("baseline lookup failed: {0}")]
    Lookup(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using VisregError
pub type Result<T> = std::result::Result<T, VisregError>;
