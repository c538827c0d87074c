use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use common::{config::ClientConfig, storage::FileStore, telemetry::init_tracing};
use tracing::{debug, info};

mod cli;
mod commands;
mod dashboard;
mod error;
mod render;
mod state;

use crate::{cli::Cli, state::AppState};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::load()?;
    let session_path = config.session.resolve_path();
    debug!("Session file: {}", session_path.display());

    let store = Arc::new(FileStore::new(session_path));
    let state = AppState::new(config, store)?;

    // Interrupting abandons in-flight detail loads
    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            shutdown.cancel();
        }
    });

    match commands::run(&state, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
