//! Content service - REST endpoint for the conference site's editable content
//!
//! Stores the whole site document under a single key in a remote key-value
//! store and serves it over GET/PUT /api/content.
//!
//! Module structure:
//! - `domain/` - Content types, defaults, normalization, validation
//! - `io/` - External interfaces (KV store, HTTP endpoint, API client)
//! - `services/` - Persistence gateway and the editor save queue
//! - `infra/` - Infrastructure (Config, Errors)

use clap::Parser;
use content_service::infra::{Config, StoreMode};
use content_service::io::api::{start_api_server, ApiState};
use content_service::io::kv::{ContentStore, HttpKvStore, KvConfig, MemoryStore};
use content_service::services::ContentGateway;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Content service - single-document content API for the conference site
#[derive(Parser, Debug)]
#[command(name = "content-service", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to the CONFIG_FILE
    /// environment variable, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Log level comes from RUST_LOG, defaulting to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git_hash = env!("GIT_HASH"), "content-service starting");

    let args = Args::parse();
    let config = Config::load(args.config.as_deref());

    let store_mode_str = match config.store_mode() {
        StoreMode::Memory => "memory",
        StoreMode::Http => "http",
    };
    info!(
        config_file = %config.config_file(),
        bind_address = %config.bind_address(),
        port = %config.server_port(),
        store_mode = %store_mode_str,
        content_key = %config.content_key(),
        "config_loaded"
    );

    if config.admin_token().is_none() {
        warn!("admin_token_not_set - PUT /api/content is open");
    }

    // Build the store per config and wire the gateway
    let store: Arc<dyn ContentStore> = match config.store_mode() {
        StoreMode::Memory => Arc::new(MemoryStore::new()),
        StoreMode::Http => Arc::new(HttpKvStore::new(KvConfig::from_config(&config))?),
    };
    let gateway = ContentGateway::new(store);
    let state = Arc::new(ApiState::new(
        gateway,
        config.admin_token().map(|t| t.to_string()),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    // Run the content API server until shutdown
    start_api_server(config.bind_address(), config.server_port(), state, shutdown_rx).await?;

    info!("content-service shutdown complete");
    Ok(())
}
