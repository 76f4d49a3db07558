//! Backblaze B2 API client.
//!
//! Thin collaborator for:
//! - Account authorization (`connect`)
//! - Streamed pass-through uploads (remote URL -> bucket object)
//! - Signed, time-limited download URLs

use std::time::Duration;

use reqwest::{header, Body, Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::config::B2Config;
use crate::{Error, Result};

/// Signed download URLs stay valid for one hour.
const DOWNLOAD_AUTH_SECONDS: u32 = 3600;

/// Client for the native B2 API.
#[derive(Clone)]
pub struct B2Client {
    client: Client,
    config: B2Config,
}

/// An authorized session, obtained per operation via [`B2Client::connect`].
#[derive(Debug, Clone)]
pub struct B2Connection {
    pub api_url: String,
    pub download_url: String,
    auth_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeResponse {
    api_url: String,
    download_url: String,
    authorization_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlResponse {
    upload_url: String,
    authorization_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadAuthResponse {
    authorization_token: String,
}

impl B2Client {
    pub fn new(config: &B2Config) -> Self {
        // No overall timeout: uploads stream arbitrarily large objects.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent("b2bridge/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Authorize against the account and return a session handle.
    pub async fn connect(&self) -> Result<B2Connection> {
        let url = format!(
            "{}/b2api/v2/b2_authorize_account",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.application_key))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Request failed: {}", e)))?;

        let auth: AuthorizeResponse = parse(check_status(response, "b2_authorize_account").await?)?;

        Ok(B2Connection {
            api_url: auth.api_url,
            download_url: auth.download_url,
            auth_token: auth.authorization_token,
        })
    }

    /// Stream a remote file into the bucket as `dest_name`.
    ///
    /// The source body is piped straight through; nothing is buffered
    /// to disk. B2's checksum check is waived since the source digest
    /// is not known up front.
    pub async fn stream_upload(
        &self,
        conn: &B2Connection,
        source_url: &str,
        dest_name: &str,
        filesize: u64,
    ) -> Result<serde_json::Value> {
        let upload = self.get_upload_url(conn).await?;

        let source = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Source fetch failed: {}", e)))?;

        if !source.status().is_success() {
            return Err(Error::Storage(format!(
                "Source fetch for '{}' returned {}",
                dest_name,
                source.status()
            )));
        }

        let response = self
            .client
            .post(&upload.upload_url)
            .header(header::AUTHORIZATION, &upload.authorization_token)
            .header("X-Bz-File-Name", urlencoding::encode(dest_name).as_ref())
            .header("X-Bz-Content-Sha1", "do_not_verify")
            .header(header::CONTENT_TYPE, "b2/x-auto")
            .header(header::CONTENT_LENGTH, filesize)
            .body(Body::wrap_stream(source.bytes_stream()))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Upload failed: {}", e)))?;

        check_status(response, dest_name).await
    }

    /// Issue a time-limited signed download URL for a bucket path.
    pub async fn signed_download_url(&self, conn: &B2Connection, path: &str) -> Result<String> {
        let url = format!(
            "{}/b2api/v2/b2_get_download_authorization",
            conn.api_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, &conn.auth_token)
            .json(&json!({
                "bucketId": self.config.bucket_id,
                "fileNamePrefix": path,
                "validDurationInSeconds": DOWNLOAD_AUTH_SECONDS,
            }))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Request failed: {}", e)))?;

        let auth: DownloadAuthResponse = parse(check_status(response, path).await?)?;

        Ok(format!(
            "{}/file/{}/{}?Authorization={}",
            conn.download_url.trim_end_matches('/'),
            self.config.bucket_name,
            path,
            auth.authorization_token
        ))
    }

    async fn get_upload_url(&self, conn: &B2Connection) -> Result<UploadUrlResponse> {
        let url = format!(
            "{}/b2api/v2/b2_get_upload_url",
            conn.api_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, &conn.auth_token)
            .json(&json!({ "bucketId": self.config.bucket_id }))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Request failed: {}", e)))?;

        parse(check_status(response, "b2_get_upload_url").await?)
    }
}

/// Map non-success responses into a diagnosable error.
async fn check_status(response: Response, context: &str) -> Result<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(Error::Storage(format!(
            "B2 API error {} at {}: {}",
            status, context, text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Storage(format!("Failed to parse response: {}", e)))
}

fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::Storage(format!("Unexpected response shape: {}", e)))
}
