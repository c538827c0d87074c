//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional `photoapp.*` file in
//! the working directory, then `PHOTOAPP_`-prefixed environment variables using
//! `__` between nesting levels (e.g. `PHOTOAPP_API__BASE_URL`).

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: BlobStorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub feed: FeedConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the photo backend (e.g. "http://localhost:3000")
    pub base_url: String,
}

/// Object storage coordinates used to build image URLs from blob names
#[derive(Debug, Clone, Deserialize)]
pub struct BlobStorageConfig {
    /// Storage account name
    pub account: String,
    /// Container holding the original uploads
    pub container: String,
    /// Explicit blob endpoint, overriding the one derived from `account`
    pub endpoint: Option<String>,
}

impl BlobStorageConfig {
    /// Blob endpoint without a trailing slash
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.blob.core.windows.net", self.account),
        }
    }

    /// Public URL of a blob in the configured container
    pub fn blob_url(&self, blob_name: &str) -> String {
        format!("{}/{}/{}", self.endpoint(), self.container, blob_name)
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Session file location; defaults to `<config dir>/photoapp/session.json`
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolve the session file path
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        match dirs::config_dir() {
            Some(dir) => dir.join("photoapp").join("session.json"),
            None => PathBuf::from(".photoapp-session.json"),
        }
    }
}

/// Which listing endpoint the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// `GET /api/photos`, filtered on the client
    Full,
    /// `GET /api/media?page&limit&search`, filtered on the server
    Paged,
}

/// Feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub source: FeedSource,
    /// Number of items requested per page (paged source only)
    pub page_size: u32,
}

impl ClientConfig {
    /// Load configuration from defaults, an optional `photoapp` file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("photoapp").required(false))
            .add_source(
                Environment::with_prefix("PHOTOAPP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Configuration builder preloaded with the defaults
    pub fn builder() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        Config::builder()
            .set_default("api.base_url", "http://localhost:3000")?
            .set_default("storage.account", "stcw2photos123")?
            .set_default("storage.container", "photos-original")?
            .set_default("feed.source", "full")?
            .set_default("feed.page_size", 10)
    }
}
