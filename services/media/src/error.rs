//! Custom error types for the media flows

use common::error::{ClientError, StatusMessage};
use thiserror::Error;

/// Error raised by feed, upload and detail operations
#[derive(Error, Debug)]
pub enum MediaError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The file selected for upload could not be read
    #[error("Failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for media results
pub type MediaResult<T> = Result<T, MediaError>;

impl StatusMessage for MediaError {
    fn status_message(&self, fallback: &str) -> String {
        match self {
            MediaError::Validation(message) => message.clone(),
            MediaError::Client(err) => err.status_message(fallback),
            MediaError::Io(_) => self.to_string(),
        }
    }
}
