//! Authentication for the PhotoApp client
//!
//! Provides the user and role models, the login endpoint client and the
//! [`SessionManager`] that persists the signed-in user between runs.

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

pub use error::{SessionError, SessionResult};
pub use models::{Role, User};
pub use session::SessionManager;
