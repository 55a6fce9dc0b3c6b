//! Business services containing domain logic and use cases.

pub mod account;
pub mod clock;
pub mod credential;
pub mod otp;
pub mod rate_limit;
pub mod security;
pub mod token;
pub mod upload;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, Mailer};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use credential::{check_password_policy, CredentialVault};
pub use otp::{MemoryOtpStore, OtpChallenge, OtpOutcome, OtpStore};
pub use rate_limit::{
    CounterStore, CounterStoreError, LimitRule, MemoryCounterStore, RateLimiter, RateWindow,
    CHAT_OPERATION, OTP_RESEND_OPERATION,
};
pub use security::SecurityCore;
pub use token::{TokenService, TokenServiceConfig};
pub use upload::{BackoffUploader, BulkDestination, DeliveryFailure, RetryPolicy, UploadReport};
