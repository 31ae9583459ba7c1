//! # Cardwise Server
//!
//! Axum HTTP surface for the recommendation backend: `/chat` drives one
//! conversational turn, `/recommend` runs the extraction-and-retrieval
//! pipeline, `/health` is a liveness probe. CORS is permissive so a browser
//! frontend can call the API directly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(routes::chat))
        .route("/recommend", post(routes::recommend))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until the process exits.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "cardwise server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
