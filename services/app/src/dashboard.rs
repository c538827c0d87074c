//! Role-gated views

use auth::{Role, User};

use crate::error::{CommandError, CommandResult};

/// Top-level view selected by the signed-in user's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    CreatorUpload,
    ConsumerFeed,
}

impl View {
    pub fn for_user(user: Option<&User>) -> Self {
        match user.map(|user| user.role) {
            None => View::Login,
            Some(Role::Creator) => View::CreatorUpload,
            Some(Role::Consumer) => View::ConsumerFeed,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Login",
            View::CreatorUpload => "Creator Dashboard (Upload)",
            View::ConsumerFeed => "Consumer Dashboard",
        }
    }

    /// Role that owns this view; the login view is open to everyone
    pub fn role(self) -> Option<Role> {
        match self {
            View::Login => None,
            View::CreatorUpload => Some(Role::Creator),
            View::ConsumerFeed => Some(Role::Consumer),
        }
    }

    /// Allow an operation that belongs to `needed` while `self` is shown
    pub fn require(self, needed: View) -> CommandResult<()> {
        match needed.role() {
            None => Ok(()),
            Some(_) if self == needed => Ok(()),
            Some(_) if self == View::Login => Err(CommandError::NotSignedIn),
            Some(required) => Err(CommandError::Forbidden { required }),
        }
    }
}
