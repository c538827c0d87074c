//! Custom error types for the command-line front end

use auth::Role;
use thiserror::Error;

/// Reason a command did not complete
///
/// Every variant displays as the status line printed to the user.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The command needs a signed-in user
    #[error("Please log in first")]
    NotSignedIn,

    /// The signed-in user has the wrong role
    #[error("This action requires the {required} role")]
    Forbidden { required: Role },

    /// The operation failed with the given status message
    #[error("{0}")]
    Failed(String),
}

/// Type alias for command results
pub type CommandResult<T> = Result<T, CommandError>;
