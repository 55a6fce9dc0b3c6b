//! Fixed-window counters in Redis
//!
//! Each window is one key holding the request count. The key is created with
//! `SET key 0 EX window NX` and bumped with `INCR` inside one `MULTI/EXEC`,
//! so the first request of a window sets the expiry and later requests never
//! extend it. Redis expires the key, which starts the next window. The
//! transaction is never retried.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use cv_core::services::rate_limit::{CounterStore, CounterStoreError};

use crate::cache::RedisClient;

/// Shared counter store used by every service instance
#[derive(Clone)]
pub struct RedisCounterStore {
    client: RedisClient,
}

impl RedisCounterStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Redis key for a limiter key
    ///
    /// Identifiers are hashed so emails and account ids never appear in the
    /// shared store.
    pub fn counter_key(&self, key: &str) -> String {
        self.client.config().make_key(&hashed_key(key))
    }
}

pub(crate) fn hashed_key(key: &str) -> String {
    format!("rl:{}", hex::encode(Sha256::digest(key.as_bytes())))
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(
        &self,
        key: &str,
        window_seconds: u64,
        _now: DateTime<Utc>,
    ) -> Result<u64, CounterStoreError> {
        let redis_key = self.counter_key(key);
        let window_seconds = window_seconds.max(1);

        // A retry could replay an EXEC whose reply was lost and count the
        // call twice, so the transaction is sent once. The limiter falls back
        // to its in-process store on error.
        let mut conn = self.client.connection();
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&redis_key)
            .arg(0)
            .arg("EX")
            .arg(window_seconds)
            .arg("NX")
            .ignore()
            .cmd("INCR")
            .arg(&redis_key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CounterStoreError::new(e.to_string()))?;

        tracing::debug!(count, window_seconds, "Shared rate counter incremented");
        Ok(count)
    }
}
