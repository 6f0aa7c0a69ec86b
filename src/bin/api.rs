//! TikTok Analytics API Server
//!
//! Run with: cargo run --bin tiktok-analytics-api
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (or the path given with
//! `--config`), then applies environment overrides:
//! - `TIKTOK_ANALYTICS_DB_PATH`: SQLite database path
//! - `TIKTOK_ANALYTICS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TIKTOK_ANALYTICS_API_PORT`: Port to listen on (default: 8000)
//! - `TIKTOK_ANALYTICS_CORS_ORIGINS`: Comma-separated allowed origins
//! - `TIKTOK_ANALYTICS_LOG_LEVEL` / `TIKTOK_ANALYTICS_LOG_FORMAT`
//! - `RUST_LOG`: Full tracing filter, wins over the configured level

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tiktok_analytics::api::{serve, AppState};
use tiktok_analytics::config::Config;
use tiktok_analytics::logging;
use tiktok_analytics::storage::PostStore;

#[derive(Parser)]
#[command(name = "tiktok-analytics-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve TikTok account analytics over HTTP")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    logging::init(&config.logging);

    tracing::info!(
        "Starting TikTok Analytics API server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db_path = config.storage.resolved_db_path();
    tracing::info!("Post database: {:?}", db_path);

    let store = Arc::new(PostStore::open(&db_path)?);
    tracing::info!("Post store ready ({} snapshots)", store.post_count()?);

    let state = AppState::from_store(store, config.api.clone());

    tracing::info!("Allowed CORS origins: {:?}", config.api.cors_origins);
    serve(state, &config.api).await?;

    tracing::info!("TikTok Analytics API server stopped");

    Ok(())
}
