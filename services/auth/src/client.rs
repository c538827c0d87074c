//! Client for the backend's authentication endpoint

use common::{error::ClientResult, http::ApiClient};
use tracing::info;

use crate::models::{LoginCredentials, LoginResponse};

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Authentication API client
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    /// Create a new authentication client
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and user record
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<LoginResponse> {
        info!("Login attempt for user: {}", credentials.email);
        self.api.post_json(LOGIN_PATH, credentials).await
    }
}
