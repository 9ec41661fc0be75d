//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for calembed
///
/// Every variant is recoverable: callers receive it as a value and decide how
/// to present it. Invalid tag tokens are never reported through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CalEmbedError {
    /// No usable upstream credential is available
    #[error("Authentication required: connect a calendar account first")]
    AuthRequired,

    /// No calendar id has been configured
    #[error("No calendar selected")]
    NoCalendarSelected,

    /// The upstream calendar call failed or returned garbage
    #[error("Failed to fetch events: {message}")]
    FetchError { message: String },

    /// Category id does not match `[A-Z0-9_-]+`
    #[error("Invalid category id format: {0}")]
    InvalidFormat(String),

    /// Category id already present (case-insensitive)
    #[error("Category already exists: {0}")]
    AlreadyExists(String),

    /// Category id not present (case-insensitive)
    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CalEmbedError {
    /// Build a [`CalEmbedError::FetchError`] from any displayable message
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchError { message: message.into() }
    }
}

/// Result type alias for calembed operations
pub type Result<T> = std::result::Result<T, CalEmbedError>;
