//! Scripted bulk destination

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

use crate::domain::entities::upload::UploadBatch;
use crate::services::upload::{BulkDestination, DeliveryFailure};

/// Destination that replays scripted failures per batch index, then succeeds
#[derive(Default)]
pub struct ScriptedDestination {
    script: Mutex<HashMap<usize, VecDeque<DeliveryFailure>>>,
    /// Every attempt as (batch index, time of the call)
    pub attempts: Mutex<Vec<(usize, Instant)>>,
    /// Batches that were accepted, in order
    pub delivered: Mutex<Vec<usize>>,
}

impl ScriptedDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next attempts on `batch_index` with these failures
    pub fn fail(self, batch_index: usize, failures: Vec<DeliveryFailure>) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(batch_index, failures.into_iter().collect());
        self
    }

    pub fn delivered(&self) -> Vec<usize> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempt_times(&self, batch_index: usize) -> Vec<Instant> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(index, _)| *index == batch_index)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl BulkDestination for ScriptedDestination {
    async fn deliver(&self, _namespace: &str, batch: &UploadBatch) -> Result<(), DeliveryFailure> {
        self.attempts
            .lock()
            .unwrap()
            .push((batch.index, Instant::now()));

        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(&batch.index)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(failure) => Err(failure),
            None => {
                self.delivered.lock().unwrap().push(batch.index);
                Ok(())
            }
        }
    }
}

pub fn transient(times: usize) -> Vec<DeliveryFailure> {
    (0..times)
        .map(|i| DeliveryFailure::Transient(format!("503 attempt {}", i + 1)))
        .collect()
}
