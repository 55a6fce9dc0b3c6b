//! # CineVerse Core
//!
//! Account-security and ingestion core for the CineVerse backend.
//! This crate contains domain entities, the services that issue and check
//! credentials, tokens, one-time passcodes and rate limits, the bulk
//! uploader used by the offline pipeline, repository interfaces and error
//! types. None of it depends on an HTTP framework.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Account, AccountId, AccountProfile, CapabilityClaims, Credential, LoginResponse, NewAccount,
    OtpRecord, SessionClaims, UploadBatch,
};
pub use errors::{
    AuthError, DomainError, DomainResult, OtpError, RateLimitError, TokenError, UploadError,
};
pub use repositories::{AccountRepository, InMemoryAccountRepository};
pub use services::{
    AccountService, AccountServiceConfig, BackoffUploader, BulkDestination, ClockSource,
    CredentialVault, Mailer, OtpChallenge, OtpOutcome, OtpStore, RateLimiter, SecurityCore,
    TokenService,
};
