//! Session management backed by the persisted key-value store
//!
//! The session manager is the only writer of the persisted `token` and `user`
//! keys and of the bearer token shared with the API client. It is built once
//! at startup from whatever the store holds and changes only through
//! [`SessionManager::login`] and [`SessionManager::logout`].

use std::sync::{Arc, RwLock};

use common::{
    http::{ApiClient, BearerToken},
    storage::KeyValueStore,
};
use tracing::{info, warn};

use crate::{
    client::AuthClient,
    error::{SessionError, SessionResult},
    models::{LoginCredentials, User},
    validation::validate_credentials,
};

/// Store key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Store key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// Session manager for the signed-in user
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    token: BearerToken,
    auth: AuthClient,
    user: Arc<RwLock<Option<User>>>,
}

impl SessionManager {
    /// Restore the session persisted in `store`, if any
    ///
    /// The token is installed on `api`'s token handle so every later request
    /// carries it. An unreadable user record counts as signed out.
    pub fn restore(store: Arc<dyn KeyValueStore>, api: ApiClient) -> SessionResult<Self> {
        let token = api.token().clone();

        let user = match store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Ignoring unreadable persisted user: {}", e);
                    None
                }
            },
            None => None,
        };

        match (&user, store.get(TOKEN_KEY)?) {
            (Some(user), Some(saved)) => {
                info!("Restored session for user: {}", user.email);
                token.set(saved);
            }
            (Some(user), None) => {
                info!("Restored user {} without a token", user.email);
                token.clear();
            }
            (None, _) => token.clear(),
        }

        Ok(Self {
            store,
            token,
            auth: AuthClient::new(api),
            user: Arc::new(RwLock::new(user)),
        })
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Check if a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Log in and persist the resulting session
    ///
    /// Empty credentials fail without a request. Nothing is persisted unless
    /// the backend accepts the credentials.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<User> {
        let credentials = LoginCredentials::new(email, password);
        validate_credentials(&credentials).map_err(SessionError::Validation)?;

        let response = self.auth.login(&credentials).await?;

        self.store.set(TOKEN_KEY, &response.token)?;
        self.store
            .set(USER_KEY, &serde_json::to_string(&response.user)?)?;
        self.token.set(response.token);
        self.set_user(Some(response.user.clone()));

        info!(
            "Logged in as {} with role {}",
            response.user.email, response.user.role
        );
        Ok(response.user)
    }

    /// Forget the session locally; the backend is not contacted
    pub fn logout(&self) -> SessionResult<()> {
        if let Some(user) = self.current_user() {
            info!("Logging out user: {}", user.email);
        }

        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.token.clear();
        self.set_user(None);

        Ok(())
    }

    fn set_user(&self, user: Option<User>) {
        *self
            .user
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{config::ApiConfig, storage::MemoryStore};

    fn offline_api() -> ApiClient {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
        };
        ApiClient::new(&config, BearerToken::default()).unwrap()
    }

    #[test]
    fn restore_from_empty_store_is_signed_out() {
        let api = offline_api();
        let session = SessionManager::restore(Arc::new(MemoryStore::new()), api.clone()).unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(api.token().get(), None);
    }

    #[test]
    fn restore_installs_persisted_token() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "abc").unwrap();
        store
            .set(USER_KEY, r#"{"email":"consumer@photoapp.com","role":"consumer"}"#)
            .unwrap();

        let api = offline_api();
        let session = SessionManager::restore(store, api.clone()).unwrap();

        let user = session.current_user().unwrap();
        assert_eq!(user.email, "consumer@photoapp.com");
        assert_eq!(api.token().get().as_deref(), Some("abc"));
    }

    #[test]
    fn unreadable_user_counts_as_signed_out() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{not json").unwrap();

        let api = offline_api();
        let session = SessionManager::restore(store, api.clone()).unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(api.token().get(), None);
    }

    #[tokio::test]
    async fn empty_credentials_fail_locally() {
        let session = SessionManager::restore(Arc::new(MemoryStore::new()), offline_api()).unwrap();

        let err = session.login("", "123456").await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }
}
