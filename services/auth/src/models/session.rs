//! Login response payload

use serde::Deserialize;

use super::User;

/// Response of `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token
    pub token: String,
    pub user: User,
}
