//! Ordered batch uploader with exponential backoff

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::domain::entities::upload::UploadBatch;
use crate::errors::UploadError;

use super::destination::{BulkDestination, DeliveryFailure};
use super::policy::RetryPolicy;

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadReport {
    /// Batches delivered by this run
    pub delivered: usize,
    /// Batches skipped because they were at or before `resume_after`
    pub skipped: usize,
    /// Total delivery attempts, including retries
    pub attempts: u64,
}

/// Delivers batches one at a time, retrying transient failures
pub struct BackoffUploader<D: BulkDestination> {
    destination: Arc<D>,
    policy: RetryPolicy,
}

impl<D: BulkDestination + 'static> BackoffUploader<D> {
    pub fn new(destination: Arc<D>, policy: RetryPolicy) -> Self {
        Self {
            destination,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Upload batches in order
    ///
    /// # Arguments
    ///
    /// * `namespace` - Target namespace at the destination
    /// * `batches` - Batches in delivery order
    /// * `resume_after` - Skip every batch whose index is at or below this one
    ///
    /// # Returns
    ///
    /// * `Ok(UploadReport)` - Every remaining batch was delivered
    /// * `Err(UploadError::PermanentFailure)` - A batch was rejected; nothing after it ran
    /// * `Err(UploadError::TransientFailure)` - A batch failed `max_attempts` times in a row
    pub async fn upload(
        &self,
        namespace: &str,
        batches: &[UploadBatch],
        resume_after: Option<usize>,
    ) -> Result<UploadReport, UploadError> {
        let mut report = UploadReport::default();

        for batch in batches {
            if resume_after.is_some_and(|last_done| batch.index <= last_done) {
                report.skipped += 1;
                continue;
            }
            self.deliver_with_retry(namespace, batch, &mut report).await?;
            report.delivered += 1;
        }

        tracing::info!(
            namespace,
            delivered = report.delivered,
            skipped = report.skipped,
            attempts = report.attempts,
            event = "upload_completed",
            "Bulk upload completed"
        );
        Ok(report)
    }

    /// Run [`upload`](Self::upload) on its own Tokio task
    ///
    /// Retry sleeps then never hold up the caller's task.
    pub fn spawn(
        self: Arc<Self>,
        namespace: String,
        batches: Vec<UploadBatch>,
        resume_after: Option<usize>,
    ) -> JoinHandle<Result<UploadReport, UploadError>> {
        tokio::spawn(async move { self.upload(&namespace, &batches, resume_after).await })
    }

    async fn deliver_with_retry(
        &self,
        namespace: &str,
        batch: &UploadBatch,
        report: &mut UploadReport,
    ) -> Result<(), UploadError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let range = batch.record_range();

        for attempt in 1..=max_attempts {
            report.attempts += 1;

            match self.destination.deliver(namespace, batch).await {
                Ok(()) => {
                    tracing::debug!(
                        batch_index = batch.index,
                        records = batch.len(),
                        attempt,
                        event = "batch_delivered",
                        "Delivered batch"
                    );
                    return Ok(());
                }
                Err(DeliveryFailure::Permanent(message)) => {
                    tracing::error!(
                        batch_index = batch.index,
                        first_record = range.start,
                        last_record = range.end.saturating_sub(1),
                        error = %message,
                        event = "batch_rejected",
                        "Batch permanently rejected"
                    );
                    return Err(UploadError::PermanentFailure {
                        batch_index: batch.index,
                        delivered: report.delivered,
                        skipped: report.skipped,
                        message,
                    });
                }
                Err(DeliveryFailure::Transient(message)) if attempt == max_attempts => {
                    tracing::error!(
                        batch_index = batch.index,
                        first_record = range.start,
                        last_record = range.end.saturating_sub(1),
                        attempts = attempt,
                        error = %message,
                        event = "batch_retries_exhausted",
                        "Batch failed after all attempts"
                    );
                    return Err(UploadError::TransientFailure {
                        batch_index: batch.index,
                        delivered: report.delivered,
                        skipped: report.skipped,
                        attempts: attempt,
                        message,
                    });
                }
                Err(DeliveryFailure::Transient(message)) => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        batch_index = batch.index,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %message,
                        event = "batch_retry",
                        "Transient delivery failure, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }

        // Unreachable: the loop returns on the last attempt
        Ok(())
    }
}
