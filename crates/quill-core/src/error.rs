//! Error types for quill.

use thiserror::Error;

/// Result type alias using quill's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for quill operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Identity service reported no active session.
    ///
    /// This is the expected outcome for anonymous visitors and must never be
    /// logged at error level by callers.
    #[error("Session missing")]
    SessionMissing,

    /// Identity service call failed for a reason other than a missing session
    #[error("Identity error: {0}")]
    Identity(String),

    /// Session cookie could not be decoded
    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl Error {
    /// True when the error means "nobody is signed in" rather than a fault.
    pub fn is_session_missing(&self) -> bool {
        matches!(self, Error::SessionMissing)
    }
}
