//! API routes for b2bridge.
//!
//! This module combines all routes into a single router.
//!
//! Route structure:
//! - /actions/* - Custom-action callbacks (signature-verified)
//! - /health - Liveness probe (public)

mod actions;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health endpoint (public)
        .merge(status::routes())
        // Callback routes (signature-verified, no auth middleware)
        .nest("/actions", actions::routes())
}
