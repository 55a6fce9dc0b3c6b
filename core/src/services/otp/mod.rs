//! One-time passcode challenge for account verification
//!
//! States per account: `NONE -> PENDING -> (VERIFIED | EXPIRED | REPLACED)`.
//! Issuing overwrites any pending record; a successful or expired
//! verification clears it exactly once.

mod service;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use service::OtpChallenge;
pub use store::{MemoryOtpStore, OtpStore};
pub use types::OtpOutcome;
