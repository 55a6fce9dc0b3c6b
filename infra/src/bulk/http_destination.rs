//! HTTP bulk destination
//!
//! POSTs `{namespace, vectors}` to `<endpoint>/vectors/upsert` and sorts every
//! failure into transient or permanent for the uploader's retry loop.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use cv_core::domain::entities::upload::UploadBatch;
use cv_core::services::upload::{BulkDestination, DeliveryFailure};
use cv_shared::config::UploadConfig;

use crate::InfrastructureError;

/// Upsert path appended to the configured endpoint
pub const UPSERT_PATH: &str = "/vectors/upsert";

/// Longest response body excerpt kept in a failure message
const BODY_EXCERPT_LEN: usize = 200;

/// Bulk destination backed by an HTTP vector index
#[derive(Clone)]
pub struct HttpBulkDestination {
    client: Client,
    upsert_url: String,
    api_key: String,
}

impl HttpBulkDestination {
    /// Build a destination from the upload configuration
    ///
    /// # Returns
    /// * `Ok(HttpBulkDestination)` - Ready to deliver
    /// * `Err(InfrastructureError::Config)` - Endpoint or API key missing
    pub fn new(config: &UploadConfig) -> Result<Self, InfrastructureError> {
        if !config.is_complete() {
            return Err(InfrastructureError::Config(
                "BULK_ENDPOINT and BULK_API_KEY must be set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            upsert_url: format!("{}{}", config.endpoint.trim_end_matches('/'), UPSERT_PATH),
            api_key: config.api_key.clone(),
        })
    }

    pub fn upsert_url(&self) -> &str {
        &self.upsert_url
    }
}

#[async_trait]
impl BulkDestination for HttpBulkDestination {
    async fn deliver(&self, namespace: &str, batch: &UploadBatch) -> Result<(), DeliveryFailure> {
        let body = json!({
            "namespace": namespace,
            "vectors": batch.records,
        });

        let response = self
            .client
            .post(&self.upsert_url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        if status.is_success() {
            debug!(
                batch = batch.index,
                records = batch.len(),
                status = status.as_u16(),
                "Batch accepted"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = format!("HTTP {}: {}", status.as_u16(), excerpt(&body));
        warn!(
            batch = batch.index,
            status = status.as_u16(),
            event = "bulk_delivery_rejected",
            "Bulk endpoint rejected batch"
        );
        Err(classify_status(status, message))
    }
}

/// Throttling, timeouts and server errors may clear up; anything else will not
pub fn classify_status(status: StatusCode, message: String) -> DeliveryFailure {
    if status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
    {
        DeliveryFailure::Transient(message)
    } else {
        DeliveryFailure::Permanent(message)
    }
}

/// Transport errors: connection and timeout failures are transient
pub(crate) fn classify_error(error: &reqwest::Error) -> DeliveryFailure {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        DeliveryFailure::Transient(error.to_string())
    } else {
        DeliveryFailure::Permanent(error.to_string())
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
