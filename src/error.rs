//! Error types for b2bridge.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("Signature rejected: {0}")]
    SignatureRejected(String),

    // Traversal / transfer errors
    #[error("Traversal error at {path}: {reason}")]
    Traversal { path: String, reason: String },

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Import error: {0}")]
    Import(String),

    // Dialogue errors
    #[error("Dialogue error: {0}")]
    Dialogue(String),

    // External service errors
    #[error("Frame.io API error: {0}")]
    FrameIo(String),

    #[error("B2 API error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn traversal(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Traversal {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // 403
            Self::SignatureRejected(_) => StatusCode::FORBIDDEN,

            // 502
            Self::FrameIo(_)
            | Self::Storage(_)
            | Self::Traversal { .. }
            | Self::Transfer(_)
            | Self::Import(_) => StatusCode::BAD_GATEWAY,

            // 500
            Self::Dialogue(_) | Self::Config(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SignatureRejected(_) => "SIGNATURE_REJECTED",
            Self::Traversal { .. } => "TRAVERSAL_ERROR",
            Self::Transfer(_) => "TRANSFER_ERROR",
            Self::Import(_) => "IMPORT_ERROR",
            Self::Dialogue(_) => "DIALOGUE_ERROR",
            Self::FrameIo(_) => "FRAMEIO_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Rejected callbacks surface nothing beyond the status; the
        // verifier has already logged the reason.
        if matches!(self, Self::SignatureRejected(_)) {
            return status.into_response();
        }

        tracing::error!(code = self.error_code(), error = %self, "Request failed");

        // Malformed submissions are an internal concern; no user-facing detail.
        let message = match &self {
            Self::Dialogue(_) => "Internal error".to_string(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON parsing error: {}", err))
    }
}
