//! Action server exposing the registry over HTTP.
//!
//! - `GET /health` - liveness check
//! - `GET /actions` - registered action names
//! - `POST /webhook` - run one action for one conversation turn

pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::actions::ActionRegistry;

pub fn create_router(registry: Arc<ActionRegistry>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/actions", get(routes::list_actions))
        .route("/webhook", post(routes::webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

pub async fn serve(registry: Arc<ActionRegistry>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Action server listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(registry)).await?;
    Ok(())
}
