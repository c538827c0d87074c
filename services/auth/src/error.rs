//! Custom error types for the session flow

use common::error::{ClientError, StatusMessage, StorageError};
use thiserror::Error;

/// Error raised by login, logout and session restore
#[derive(Error, Debug)]
pub enum SessionError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The login request failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The session could not be persisted or cleared
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The user record could not be serialized for persistence
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for session results
pub type SessionResult<T> = Result<T, SessionError>;

impl StatusMessage for SessionError {
    fn status_message(&self, fallback: &str) -> String {
        match self {
            SessionError::Validation(message) => message.clone(),
            SessionError::Client(err) => err.status_message(fallback),
            SessionError::Storage(err) => err.status_message(fallback),
            SessionError::Serialization(_) => fallback.to_string(),
        }
    }
}
