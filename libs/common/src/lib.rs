//! Common library for the PhotoApp client
//!
//! This crate provides shared functionality used across the client crates,
//! including configuration, the HTTP client for the photo backend, error
//! handling, session persistence and tracing setup.

pub mod config;
pub mod error;
pub mod http;
pub mod storage;
pub mod telemetry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Example usage of the HTTP client
///
/// ```rust,no_run
/// use common::config::ClientConfig;
/// use common::http::{ApiClient, BearerToken};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::load()?;
///     let client = ApiClient::new(&config.api, BearerToken::default())?;
///     let photos: serde_json::Value = client.get_json("/api/photos").await?;
///     println!("{photos}");
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
