//! keyswitch command-line entry point
//!
//! Keys live in a JSON file under the platform data directory (or `--store`). The
//! fallback key and endpoint overrides come from the environment
//! (`GEMINI_API_KEY`, `GEMINI_PROXY_URL`, `GEMINI_API_BASE`).
//!
//! Logs go to stderr; stdout carries command output only.

mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use keyswitch_app::adapters::JsonFileKeyValueStore;
use keyswitch_app::AppStateBuilder;
use keyswitch_core::config::EnvironmentConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;

const DATA_DIR_NAME: &str = "keyswitch";
const STORE_FILE_NAME: &str = "store.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let store_path = match cli.store {
        Some(path) => path,
        None => default_store_path()?,
    };
    tracing::debug!("Using store file {}", store_path.display());

    let state = AppStateBuilder::new()
        .key_value_store(Arc::new(JsonFileKeyValueStore::new(store_path)))
        .environment(EnvironmentConfig::from_env())
        .build()
        .context("Failed to initialize keyswitch")?;

    commands::execute(&state, cli.command).await
}

fn default_store_path() -> anyhow::Result<PathBuf> {
    let data_dir =
        dirs::data_dir().context("Cannot determine the platform data directory; pass --store")?;
    Ok(data_dir.join(DATA_DIR_NAME).join(STORE_FILE_NAME))
}
