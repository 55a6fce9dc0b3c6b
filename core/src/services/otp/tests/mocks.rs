//! Mock OTP store for failure paths

use async_trait::async_trait;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::otp::OtpRecord;
use crate::errors::OtpError;
use crate::services::otp::OtpStore;

/// Store whose every call fails
pub struct FailingOtpStore;

#[async_trait]
impl OtpStore for FailingOtpStore {
    async fn store(&self, _record: OtpRecord) -> Result<(), OtpError> {
        Err(OtpError::Storage {
            message: "connection refused".to_string(),
        })
    }

    async fn load(&self, _account_id: AccountId) -> Result<Option<OtpRecord>, OtpError> {
        Err(OtpError::Storage {
            message: "connection refused".to_string(),
        })
    }

    async fn clear_if_matches(
        &self,
        _account_id: AccountId,
        _code: &str,
    ) -> Result<bool, OtpError> {
        Err(OtpError::Storage {
            message: "connection refused".to_string(),
        })
    }
}
