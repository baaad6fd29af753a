use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::controller::web_controller::{health, index, submit_form, submit_json, WebState};
use super::Container;

/// Build the web surface. Only the two submit routes reach the generative API.
pub fn build_web_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/advice", post(submit_form))
        .route("/api/advice", post(submit_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(WebState::new(container))
}

/// Serve until the process is interrupted.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "Serving advice form on http://{} (model {}{})",
        addr,
        container.model(),
        if container.offline() { ", offline" } else { "" }
    );

    axum::serve(listener, build_web_router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        // No signal handler: run until killed.
        Err(_) => std::future::pending::<()>().await,
    }
}
