//! One-time passcode record for email verification.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use std::fmt;

use super::account::AccountId;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an issued code (10 minutes)
pub const DEFAULT_OTP_TTL_SECONDS: i64 = 600;

/// A pending OTP challenge; at most one exists per account
#[derive(Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub account_id: AccountId,

    /// Exactly six ASCII digits, zero-padded
    pub code: String,

    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record with a fresh code from the OS CSPRNG
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account the challenge belongs to
    /// * `now` - Issue time
    /// * `ttl` - Lifetime of the code
    pub fn generate(account_id: AccountId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            account_id,
            code: Self::generate_code(),
            expires_at: now + ttl,
        }
    }

    fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Valid while `now <= expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

impl fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpRecord")
            .field("account_id", &self.account_id)
            .field("code", &"******")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
