//! Bulk upload configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};

use super::auth::parse_env;

/// Settings for pushing record batches to the external index
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Base URL of the bulk endpoint
    #[serde(default)]
    pub endpoint: String,

    /// API key sent with every request
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Target namespace inside the index
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Records per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Attempts per batch before giving up on transient failures
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit in milliseconds (delay = unit * 2^attempt)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Optional ceiling on a single backoff sleep, in milliseconds
    #[serde(default)]
    pub max_delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            namespace: default_namespace(),
            batch_size: default_batch_size(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl UploadConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("BULK_ENDPOINT").unwrap_or_default(),
            api_key: std::env::var("BULK_API_KEY").unwrap_or_default(),
            namespace: std::env::var("BULK_NAMESPACE").unwrap_or(defaults.namespace),
            batch_size: parse_env("UPLOAD_BATCH_SIZE", defaults.batch_size),
            max_attempts: parse_env("UPLOAD_MAX_ATTEMPTS", defaults.max_attempts),
            base_delay_ms: parse_env("UPLOAD_BASE_DELAY_MS", defaults.base_delay_ms),
            max_delay_ms: std::env::var("UPLOAD_MAX_DELAY_MS")
                .ok()
                .and_then(|raw| raw.trim().parse().ok()),
            request_timeout_seconds: parse_env(
                "UPLOAD_REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
        }
    }

    /// Check that the endpoint and key are present
    pub fn is_complete(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

fn default_namespace() -> String {
    String::from("movies")
}

fn default_batch_size() -> usize {
    100
}

fn default_max_attempts() -> u32 {
    10
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    30
}
