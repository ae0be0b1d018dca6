//! Content Relay - adaptive cache and proxy for a headless CMS frontend
//!
//! Serves content from an upstream CMS API through an in-memory proxy
//! cache, backed by a persistent store with content-age-driven TTLs and a
//! periodic background sweep.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod proxy;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::CacheStore;
use config::Config;
use proxy::{ProxyCache, UpstreamClient};
use tasks::Sweeper;

/// Main entry point for the content relay.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the persistent cache store
/// 4. Start the background sweeper (initial sweep, then periodic)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Content Relay");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, port={}, cache_dir={}, sweep_interval={}s",
        config.upstream_base_url,
        config.server_port,
        config.cache_dir.display(),
        config.sweep_interval_secs
    );

    let store = Arc::new(
        CacheStore::open(&config.cache_dir)
            .await
            .context("failed to open cache store")?,
    );
    info!("Cache store opened, {} entries", store.len().await);

    let upstream = UpstreamClient::new(&config.upstream_base_url, config.fetch_timeout())
        .context("failed to build upstream client")?;
    let state = AppState::new(store.clone(), Arc::new(ProxyCache::new()), upstream);

    // The sweeper lives in the composition root; init is idempotent but
    // is reached exactly once here.
    let sweeper = Sweeper::new(store, config.sweep_interval());
    let sweep_handle = sweeper
        .init()
        .context("sweeper was already initialized")?;
    info!("Background cache sweeper started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Sweeper task aborted");
}
