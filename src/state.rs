//! Application state for b2bridge.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{B2Client, FrameIoClient, TransferService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Frame.io API client.
    pub frameio: Arc<FrameIoClient>,
    /// Backblaze B2 API client.
    pub b2: Arc<B2Client>,
    /// Transfer orchestration service.
    pub transfer: TransferService,
    /// Shared secret for callback signature verification.
    pub signing_secret: String,
    /// Bucket display name, interpolated into the import question.
    pub bucket_name: String,
}

impl AppState {
    /// Create a new application state from explicit configuration.
    pub fn new(config: &Config) -> Self {
        let frameio = Arc::new(FrameIoClient::new(&config.frameio));
        let b2 = Arc::new(B2Client::new(&config.b2));

        let transfer = TransferService::new(frameio.clone(), b2.clone(), config.actions.clone());

        Self {
            frameio,
            b2,
            transfer,
            signing_secret: config.actions.signing_secret.clone(),
            bucket_name: config.b2.bucket_name.clone(),
        }
    }
}
