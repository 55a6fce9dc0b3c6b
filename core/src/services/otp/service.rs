//! OTP challenge implementation

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::otp::{OtpRecord, DEFAULT_OTP_TTL_SECONDS};
use crate::errors::OtpError;

use super::store::OtpStore;
use super::types::OtpOutcome;

/// Issues and validates six-digit one-time codes
pub struct OtpChallenge<S: OtpStore> {
    store: Arc<S>,
    ttl: Duration,
}

impl<S: OtpStore> OtpChallenge<S> {
    /// Create a challenge with the default 600 second lifetime
    pub fn new(store: Arc<S>) -> Self {
        Self::with_ttl(store, Duration::seconds(DEFAULT_OTP_TTL_SECONDS))
    }

    pub fn with_ttl(store: Arc<S>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh code for an account, replacing any pending one
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The six-digit code to deliver
    /// * `Err(OtpError::Storage)` - The record could not be stored
    pub async fn issue(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> Result<String, OtpError> {
        let record = OtpRecord::generate(account_id, now, self.ttl);
        let code = record.code.clone();
        let expires_at = record.expires_at;

        self.store.store(record).await.map_err(|e| {
            tracing::error!(
                account_id,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store OTP record"
            );
            e
        })?;

        tracing::info!(
            account_id,
            expires_at = %expires_at,
            event = "otp_issued",
            "Issued OTP challenge"
        );
        Ok(code)
    }

    /// Check a submitted code
    ///
    /// The code is compared in constant time before expiry is considered.
    /// A match clears the record whether or not it has expired; a mismatch
    /// leaves it pending.
    pub async fn verify(
        &self,
        account_id: AccountId,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<OtpOutcome, OtpError> {
        let Some(record) = self.store.load(account_id).await? else {
            tracing::debug!(account_id, event = "otp_no_challenge", "No pending OTP");
            return Ok(OtpOutcome::NoChallenge);
        };

        if !constant_time_eq(record.code.as_bytes(), submitted.as_bytes()) {
            tracing::warn!(account_id, event = "otp_wrong_code", "OTP verification failed");
            return Ok(OtpOutcome::WrongCode);
        }

        // Only the caller that removes the record owns the outcome
        let cleared = self.store.clear_if_matches(account_id, &record.code).await?;
        if !cleared {
            return Ok(OtpOutcome::NoChallenge);
        }

        if record.is_expired(now) {
            tracing::info!(account_id, event = "otp_expired", "OTP matched after expiry");
            return Ok(OtpOutcome::Expired);
        }

        tracing::info!(account_id, event = "otp_verified", "OTP verified");
        Ok(OtpOutcome::Verified)
    }
}
