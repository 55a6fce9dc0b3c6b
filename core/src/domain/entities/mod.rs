//! Domain entities representing core business objects.

pub mod account;
pub mod credential;
pub mod otp;
pub mod token;
pub mod upload;

// Re-export commonly used types
pub use account::{Account, AccountId, NewAccount};
pub use credential::Credential;
pub use otp::{OtpRecord, CODE_LENGTH, DEFAULT_OTP_TTL_SECONDS};
pub use token::{
    CapabilityClaims, SessionClaims, PASSWORD_RESET_PURPOSE, RESET_TOKEN_TTL_SECONDS,
    SESSION_PURPOSE, SESSION_TOKEN_TTL_SECONDS,
};
pub use upload::UploadBatch;
