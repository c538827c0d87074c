//! Custom error types for the common library
//!
//! This module defines the errors raised at the HTTP boundary and by session
//! persistence, plus the rule that turns any of them into a user-visible
//! status line.

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by calls to the photo backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered with a non-success status
    #[error("Request failed with status code {}", status.as_u16())]
    Api {
        status: StatusCode,
        /// Structured `error` field of the response body
        error: Option<String>,
        /// Generic `message` field of the response body
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The response body did not match any supported shape
    #[error("Unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured base URL cannot be joined with an endpoint path
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Error raised by the persisted key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Conversion of a failure into the status line shown to the user
///
/// Precedence: server `error` field, server `message` field, transport-level
/// message, then the caller's fallback.
pub trait StatusMessage {
    fn status_message(&self, fallback: &str) -> String;
}

impl StatusMessage for ClientError {
    fn status_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { error, message, .. } => non_empty(error)
                .or(non_empty(message))
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            ClientError::Transport(err) => {
                let text = err.to_string();
                if text.is_empty() {
                    fallback.to_string()
                } else {
                    text
                }
            }
            ClientError::Decode(_) | ClientError::InvalidUrl { .. } => fallback.to_string(),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

impl StatusMessage for StorageError {
    fn status_message(&self, _fallback: &str) -> String {
        self.to_string()
    }
}
