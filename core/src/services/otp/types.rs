//! Types for OTP verification results

use crate::errors::OtpError;

/// Outcome of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    /// Code matched before expiry; the record is gone
    Verified,
    /// Code did not match; the record stays pending
    WrongCode,
    /// Code matched after expiry; the record is gone
    Expired,
    /// No pending record for the account
    NoChallenge,
}

impl OtpOutcome {
    /// Maps every non-success outcome to its error
    pub fn into_result(self) -> Result<(), OtpError> {
        match self {
            OtpOutcome::Verified => Ok(()),
            OtpOutcome::WrongCode => Err(OtpError::OtpWrongCode),
            OtpOutcome::Expired => Err(OtpError::OtpExpired),
            OtpOutcome::NoChallenge => Err(OtpError::OtpNotFound),
        }
    }
}
