//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
}

/// GET /health - always 200, `store` reports whether the backend answered
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, store) = match state.store().ping().await {
        Ok(()) => ("ok", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unreachable");
            ("degraded", "unreachable")
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
