//! Bulk upload with retry and exponential backoff
//!
//! Batches go to a `BulkDestination` strictly in order. Transient failures
//! are retried with `base * 2^attempt` delays; a permanent failure or an
//! exhausted retry budget stops the run and names the failing batch.

mod destination;
mod policy;
mod uploader;

#[cfg(test)]
mod tests;

pub use destination::{BulkDestination, DeliveryFailure};
pub use policy::RetryPolicy;
pub use uploader::{BackoffUploader, UploadReport};
