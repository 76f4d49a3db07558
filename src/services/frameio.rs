//! Frame.io API client.
//!
//! Thin collaborator for:
//! - Asset listing (single asset or `{id}/children` listings)
//! - Folder creation
//! - Asset creation from a remote source URL

use std::time::Duration;

use reqwest::{header, Client, Response};
use serde_json::json;

use crate::config::FrameIoConfig;
use crate::models::AssetNode;
use crate::{Error, Result};

/// Client for the Frame.io v2 API.
#[derive(Clone)]
pub struct FrameIoClient {
    client: Client,
    token: String,
    base_url: String,
}

impl FrameIoClient {
    pub fn new(config: &FrameIoConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("b2bridge/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build headers with authentication.
    fn build_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", self.token).parse().unwrap(),
        );
        headers
    }

    /// List the asset nodes at an id or `{id}/children` path.
    ///
    /// A bare asset id returns a single object on the wire; it is
    /// normalized into a one-element list so callers always see a list.
    pub async fn get_assets(&self, path: &str) -> Result<Vec<AssetNode>> {
        let url = format!("{}/assets/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| Error::FrameIo(format!("Request failed: {}", e)))?;

        let body: serde_json::Value = check_status(response, path).await?;

        let nodes = match body {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<AssetNode>, _>>(),
            single => serde_json::from_value(single).map(|node| vec![node]),
        };

        nodes.map_err(|e| Error::FrameIo(format!("Failed to parse assets at {}: {}", path, e)))
    }

    /// Create a folder under a parent asset.
    pub async fn create_folder(&self, parent_id: &str, name: &str) -> Result<AssetNode> {
        let url = format!("{}/assets/{}/children", self.base_url, parent_id);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&json!({
                "name": name,
                "type": "folder",
            }))
            .send()
            .await
            .map_err(|e| Error::FrameIo(format!("Request failed: {}", e)))?;

        let body: serde_json::Value = check_status(response, parent_id).await?;
        serde_json::from_value(body)
            .map_err(|e| Error::FrameIo(format!("Failed to parse created folder: {}", e)))
    }

    /// Create a file asset that the platform ingests from `source_url`.
    pub async fn create_asset(
        &self,
        parent_id: &str,
        name: &str,
        source_url: &str,
        filesize: u64,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/assets/{}/children", self.base_url, parent_id);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&json!({
                "name": name,
                "type": "file",
                "source": { "url": source_url },
                "filesize": filesize,
            }))
            .send()
            .await
            .map_err(|e| Error::FrameIo(format!("Request failed: {}", e)))?;

        check_status(response, parent_id).await
    }
}

/// Map non-success responses into a diagnosable error.
async fn check_status(response: Response, context: &str) -> Result<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(Error::FrameIo(format!(
            "Frame.io API error {} at {}: {}",
            status, context, text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::FrameIo(format!("Failed to parse response: {}", e)))
}
