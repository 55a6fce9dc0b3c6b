//! Fixed-window request rate limiting
//!
//! `RateLimiter` prefers a shared `CounterStore` (Redis in production) and
//! falls back to its in-process `MemoryCounterStore` when none is configured
//! or the shared store errors.

mod limiter;
mod rules;
mod store;


pub use limiter::RateLimiter;
pub use rules::{LimitRule, CHAT_OPERATION, OTP_RESEND_OPERATION};
pub use store::{CounterStore, CounterStoreError, MemoryCounterStore, RateWindow};
