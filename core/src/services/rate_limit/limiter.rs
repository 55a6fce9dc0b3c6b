//! Rate limiter with shared-store preference and in-process fallback

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult, RateLimitError};

use super::rules::LimitRule;
use super::store::{CounterStore, MemoryCounterStore};

/// Fixed-window limiter keyed by `"<operation>:<identifier>"`
pub struct RateLimiter {
    shared: Option<Arc<dyn CounterStore>>,
    local: MemoryCounterStore,
}

impl RateLimiter {
    /// Create a limiter
    ///
    /// # Arguments
    ///
    /// * `shared` - Preferred cross-instance store, if one is reachable
    /// * `local` - In-process table used without a shared store and on its errors
    pub fn new(shared: Option<Arc<dyn CounterStore>>, local: MemoryCounterStore) -> Self {
        Self { shared, local }
    }

    /// Limiter that only counts within this process
    pub fn in_process() -> Self {
        Self::new(None, MemoryCounterStore::default())
    }

    /// Limiter preferring the given shared store
    pub fn with_shared(shared: Arc<dyn CounterStore>) -> Self {
        Self::new(Some(shared), MemoryCounterStore::default())
    }

    pub fn has_shared_store(&self) -> bool {
        self.shared.is_some()
    }

    /// Count one request for `key` and decide whether it is allowed
    ///
    /// Every call increments exactly once, allowed or not. The request is
    /// allowed while the window's count stays at or below `max_requests`.
    pub async fn allow(
        &self,
        key: &str,
        max_requests: u32,
        window_seconds: u64,
        now: DateTime<Utc>,
    ) -> bool {
        // A zero-length window cannot expire in the shared store
        let window_seconds = window_seconds.max(1);
        let count = self.increment(key, window_seconds, now).await;
        count <= u64::from(max_requests)
    }

    /// Apply a limit rule to `operation` for `identifier`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Request allowed
    /// * `Err(DomainError::RateLimit)` - Limit reached for the current window
    pub async fn check(
        &self,
        rule: LimitRule,
        operation: &str,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let key = format!("{}:{}", operation, identifier);
        if self
            .allow(&key, rule.max_requests, rule.window_seconds, now)
            .await
        {
            return Ok(());
        }

        tracing::warn!(
            operation,
            max_requests = rule.max_requests,
            window_seconds = rule.window_seconds,
            event = "rate_limit_exceeded",
            "Rate limit exceeded"
        );
        Err(DomainError::RateLimit(RateLimitError::RateLimited {
            operation: operation.to_string(),
        }))
    }

    async fn increment(&self, key: &str, window_seconds: u64, now: DateTime<Utc>) -> u64 {
        if let Some(shared) = &self.shared {
            match shared.increment(key, window_seconds, now).await {
                Ok(count) => return count,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        event = "rate_limit_store_fallback",
                        "Shared counter store failed, counting in process"
                    );
                }
            }
        }
        self.local.hit(key, window_seconds, now)
    }
}
