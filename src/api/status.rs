//! Status routes.
//!
//! Routes:
//! - GET /health - Liveness probe

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::AppState;

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
