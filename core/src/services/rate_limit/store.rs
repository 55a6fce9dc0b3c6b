//! Counter stores backing the rate limiter

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

/// Failure of a shared counter store; always recovered by the limiter
#[derive(Error, Debug, Clone)]
#[error("Counter store unavailable: {message}")]
pub struct CounterStoreError {
    pub message: String,
}

impl CounterStoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Atomic increment with expiry
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the counter for `key` and return the new count
    ///
    /// The first increment of a window creates it with count 1 and an expiry
    /// `window_seconds` later; an expired window starts over.
    async fn increment(
        &self,
        key: &str,
        window_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, CounterStoreError>;
}

/// One fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub count: u64,
    pub expires_at: DateTime<Utc>,
}

impl RateWindow {
    fn open(now: DateTime<Utc>, window_seconds: u64) -> Self {
        let expires_at = i64::try_from(window_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            count: 0,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Sharded in-process counter table
///
/// Expired windows are replaced on their next use and swept from the table
/// at most once per prune interval.
#[derive(Debug)]
pub struct MemoryCounterStore {
    windows: DashMap<String, RateWindow>,
    prune_interval_seconds: i64,
    last_prune: AtomicI64,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new(60)
    }
}

impl MemoryCounterStore {
    pub fn new(prune_interval_seconds: u64) -> Self {
        Self {
            windows: DashMap::new(),
            prune_interval_seconds: i64::try_from(prune_interval_seconds).unwrap_or(i64::MAX),
            last_prune: AtomicI64::new(i64::MIN),
        }
    }

    /// Increment and return the count for `key` in its current window
    pub fn hit(&self, key: &str, window_seconds: u64, now: DateTime<Utc>) -> u64 {
        self.prune_expired(now);

        let mut window = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| RateWindow::open(now, window_seconds));
        if window.is_expired(now) {
            *window = RateWindow::open(now, window_seconds);
        }
        window.count += 1;
        window.count
    }

    /// Current window for a key, if one is tracked
    pub fn window(&self, key: &str) -> Option<RateWindow> {
        self.windows.get(key).map(|entry| *entry.value())
    }

    /// Number of tracked keys, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn prune_expired(&self, now: DateTime<Utc>) {
        let now_secs = now.timestamp();
        let last = self.last_prune.load(Ordering::Relaxed);
        if now_secs.saturating_sub(last) < self.prune_interval_seconds {
            return;
        }
        // One caller per interval does the sweep
        if self
            .last_prune
            .compare_exchange(last, now_secs, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
        {
            self.windows.retain(|_, window| !window.is_expired(now));
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(
        &self,
        key: &str,
        window_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, CounterStoreError> {
        Ok(self.hit(key, window_seconds, now))
    }
}
