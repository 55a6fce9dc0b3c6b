//! Storage seam for pending OTP records

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use dashmap::DashMap;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::otp::OtpRecord;
use crate::errors::OtpError;

/// Trait for OTP record storage
///
/// At most one record exists per account. `clear_if_matches` must be atomic
/// so that concurrent verifications of the same record succeed at most once.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a record, replacing any pending one for the same account
    async fn store(&self, record: OtpRecord) -> Result<(), OtpError>;

    /// Load the pending record for an account
    async fn load(&self, account_id: AccountId) -> Result<Option<OtpRecord>, OtpError>;

    /// Remove the account's record only if its code equals `code`
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - No record, or the record carries another code
    async fn clear_if_matches(&self, account_id: AccountId, code: &str) -> Result<bool, OtpError>;
}

/// Sharded in-process OTP store
///
/// Updates to one account are serialized by its shard lock; different
/// accounts do not contend.
#[derive(Debug, Default)]
pub struct MemoryOtpStore {
    records: DashMap<AccountId, OtpRecord>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn store(&self, record: OtpRecord) -> Result<(), OtpError> {
        self.records.insert(record.account_id, record);
        Ok(())
    }

    async fn load(&self, account_id: AccountId) -> Result<Option<OtpRecord>, OtpError> {
        Ok(self.records.get(&account_id).map(|entry| entry.value().clone()))
    }

    async fn clear_if_matches(&self, account_id: AccountId, code: &str) -> Result<bool, OtpError> {
        let removed = self.records.remove_if(&account_id, |_, record| {
            constant_time_eq(record.code.as_bytes(), code.as_bytes())
        });
        Ok(removed.is_some())
    }
}
