//! Destination seam for bulk delivery

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::upload::UploadBatch;

/// Why a delivery attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// May succeed on retry (timeouts, throttling, server errors)
    #[error("transient: {0}")]
    Transient(String),

    /// Will not succeed without changing the request
    #[error("permanent: {0}")]
    Permanent(String),
}

/// External bulk endpoint receiving record batches
#[async_trait]
pub trait BulkDestination: Send + Sync {
    /// Deliver one batch into `namespace`
    async fn deliver(&self, namespace: &str, batch: &UploadBatch) -> Result<(), DeliveryFailure>;
}
