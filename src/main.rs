//! Weightlog API Server
//!
//! Run with: cargo run --bin weightlog
//!
//! # Configuration
//!
//! Read from the first config file found (see [`Config::load_default`]),
//! then overridden by environment variables:
//! - `WEIGHTLOG_DB_PATH`: SQLite database file
//! - `WEIGHTLOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `WEIGHTLOG_API_PORT`: Port to listen on (default: 8082)
//! - `WEIGHTLOG_LOG_LEVEL`: Log level (default: info)
//! - `WEIGHTLOG_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Full filter directive, wins over the level above

use anyhow::Context;
use std::sync::Arc;
use weightlog::api::{serve, AppState};
use weightlog::config::Config;
use weightlog::logging::init_tracing;
use weightlog::storage::EntryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default().context("loading configuration")?;
    init_tracing(&config.logging);

    match &config.source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    tracing::info!("Starting Weightlog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {:?}", config.storage.db_path);

    let store = EntryStore::open(&config.storage.db_path)
        .with_context(|| format!("opening entry store at {:?}", config.storage.db_path))?;
    let state = AppState::new(Arc::new(store), config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Weightlog API server stopped");
    Ok(())
}
