//! Tracing setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Logs go to stderr so stdout carries only rendered views. The level defaults
/// to `info` and follows `RUST_LOG` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
