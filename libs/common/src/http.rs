//! HTTP client for the photo backend
//!
//! Every request goes through [`ApiClient`], which attaches the current bearer
//! token, decodes JSON bodies and maps non-success responses to
//! [`ClientError::Api`] carrying the server's `error`/`message` fields.

use std::sync::{Arc, RwLock};

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Shared handle on the session's bearer token
///
/// The session manager writes it on login and logout; the API client reads it
/// for every request.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<String>>>);

impl BearerToken {
    /// Current token, if any
    pub fn get(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Install a token for subsequent requests
    pub fn set(&self, token: impl Into<String>) {
        *self
            .0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    /// Stop attaching a token
    pub fn clear(&self) {
        *self
            .0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Client for the photo backend REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: BearerToken,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig, token: BearerToken) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder().build().map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Token handle used by this client
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// `GET path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path)?;
        self.send(Method::GET, path, request).await
    }

    /// `GET path?query` and decode the JSON body
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(Method::GET, path, request).await
    }

    /// `POST path` with a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, path, request).await
    }

    /// `POST path` with a multipart form and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path)?.multipart(form);
        self.send(Method::POST, path, request).await
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let url = Url::parse(&url).map_err(|e| ClientError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let mut request = self.http.request(method, url);
        if let Some(token) = self.token.get() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            debug!("{} {} failed: {}", method, path, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        debug!("{} {} -> {}", method, path, status);

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        decode(&body)
    }
}

/// Build an API error from a failed response body, keeping its message fields
fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    ClientError::Api {
        status,
        error: field("error"),
        message: field("message"),
    }
}

/// Decode a success body; an empty body decodes as JSON `null`
fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(ClientError::Decode);
    }
    serde_json::from_slice(body).map_err(ClientError::Decode)
}
