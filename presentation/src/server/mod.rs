//! HTTP server exposing discussions one step at a time

mod api;

pub use api::{ApiError, AppState, SharedState, api_router};

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Where the server listens and how often idle sessions are swept
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub reap_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            reap_interval: Duration::from_secs(600),
        }
    }
}

/// Build the application router.
pub fn build_router(state: SharedState) -> Router {
    api_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Periodically drop idle sessions until the task is aborted.
pub fn spawn_reaper(state: SharedState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let reaped = state.registry.reap();
            debug!(
                "Reaper swept {} session(s), {} active",
                reaped.len(),
                state.registry.len()
            );
        }
    })
}

/// Start the server and run until Ctrl+C.
pub async fn start_server(state: SharedState, config: ServerConfig) -> Result<()> {
    let reaper = spawn_reaper(Arc::clone(&state), config.reap_interval);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    info!("Listening on http://{}", local_addr);
    println!("Roundtable server running at http://{}", local_addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    reaper.abort();
    served?;
    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    println!("\nShutting down...");
}
