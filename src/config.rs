//! Configuration management for b2bridge.
//!
//! Loads configuration from environment variables once at startup.
//! Sections are passed explicitly into each service at construction;
//! nothing reads process-wide state after init.

use std::env;
use std::sync::OnceLock;

use crate::{Error, Result};

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration. Panics if `init` has not run.
pub fn config() -> &'static Config {
    CONFIG.get().expect("config not initialized")
}

/// Initialize configuration (call once at startup).
pub fn init() -> Result<&'static Config> {
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub frameio: FrameIoConfig,
    pub b2: B2Config,
    pub actions: ActionsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct FrameIoConfig {
    /// Developer token for the Frame.io v2 API.
    pub token: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct B2Config {
    pub key_id: String,
    pub application_key: String,
    pub bucket_id: String,
    pub bucket_name: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ActionsConfig {
    /// Shared secret for custom-action signature verification.
    pub signing_secret: String,
    /// Prefix under which exports land in the bucket; stripped from
    /// import paths when deriving destination names.
    pub upload_path: String,
    /// Folder name created under the project root for imported files.
    pub download_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8675")
                    .parse()
                    .map_err(|_| Error::Config("Invalid PORT".into()))?,
            },
            frameio: FrameIoConfig {
                token: require("FRAMEIO_TOKEN")?,
                base_url: env_or("FRAMEIO_API_URL", "https://api.frame.io/v2"),
            },
            b2: B2Config {
                key_id: require("B2_KEY_ID")?,
                application_key: require("B2_APP_KEY")?,
                bucket_id: require("B2_BUCKET_ID")?,
                bucket_name: require("B2_BUCKET_NAME")?,
                base_url: env_or("B2_API_URL", "https://api.backblazeb2.com"),
            },
            actions: ActionsConfig {
                signing_secret: require("FRAMEIO_SIGNING_SECRET")?,
                upload_path: env_or("UPLOAD_PATH", "frameio_exports/"),
                download_path: env_or("DOWNLOAD_PATH", "b2_imports"),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::Config(format!("{} must be set", key)))
}
