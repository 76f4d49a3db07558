//! Custom-action callback routes.
//!
//! The single webhook endpoint behind the whole bridge. Every callback
//! is signature-verified against the raw body before anything else
//! runs; the dialogue controller then either returns the next form to
//! render or resolves into an export or import operation.
//!
//! Routes:
//! - POST /actions/frameio - Handle a custom-action callback

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::models::ActionRequest;
use crate::services::{dialogue, signature, DialogueStep};
use crate::{AppState, Error, Result};

const TIMESTAMP_HEADER: &str = "X-Frameio-Request-Timestamp";
const SIGNATURE_HEADER: &str = "X-Frameio-Signature";

/// Build callback routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/frameio", post(handle_action))
}

/// Handle a custom-action callback.
///
/// POST /actions/frameio
#[axum::debug_handler]
async fn handle_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|v| v.to_str().ok());
    let sig = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    signature::verify(timestamp, sig, &body, &state.signing_secret)?;

    let request: ActionRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Malformed callback body");
        Error::Dialogue(format!("invalid callback body: {}", e))
    })?;

    tracing::info!(
        request_type = %request.request_type,
        resource = %request.resource.id,
        "Received action callback"
    );

    match dialogue::next_step(request.data.as_ref(), &request.request_type, &state.bucket_name)? {
        DialogueStep::Question(form) => Ok(Json(form).into_response()),
        DialogueStep::Export { depth } => {
            let reports = state
                .transfer
                .export_files(&request.resource.id, &depth)
                .await?;
            Ok(Json(reports).into_response())
        }
        DialogueStep::Import { b2path } => {
            let filesize = request.filesize.unwrap_or(0);
            let report = state
                .transfer
                .import_file(&request.resource.id, &b2path, filesize)
                .await?;
            Ok(Json(report).into_response())
        }
    }
}
