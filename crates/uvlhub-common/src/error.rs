//! Error types for UVLHub

use thiserror::Error;

/// Result type alias for UVLHub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Main error type shared across UVLHub crates
#[derive(Error, Debug)]
pub enum HubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown publication type: {0}")]
    UnknownPublicationType(String),
}
