//! Error types for account security and ingestion operations

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier or wrong password; the two are not distinguished
    #[error("Incorrect username/email or password")]
    InvalidCredentials,

    #[error("Password does not meet the policy: {reason}")]
    WeakPassword { reason: String },

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account not verified. Please enter the code sent to your email")]
    AccountNotVerified,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Missing or malformed bearer authorization")]
    MissingBearer,

    #[error("Username is already taken")]
    UsernameTaken,

    /// Session belongs to a different account than the one being changed
    #[error("Not allowed")]
    NotAccountOwner,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::WeakPassword { .. } => "WEAK_PASSWORD",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AuthError::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AuthError::MissingBearer => "MISSING_BEARER",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::NotAccountOwner => "NOT_ACCOUNT_OWNER",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    TokenMalformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token purpose mismatch: expected {expected}, found {found}")]
    TokenPurposeMismatch { expected: String, found: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenMalformed => "TOKEN_MALFORMED",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenPurposeMismatch { .. } => "TOKEN_PURPOSE_MISMATCH",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// One-time passcode errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid OTP code")]
    OtpWrongCode,

    #[error("OTP expired")]
    OtpExpired,

    #[error("No pending OTP for this account")]
    OtpNotFound,

    #[error("OTP storage failure: {message}")]
    Storage { message: String },
}

impl OtpError {
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::OtpWrongCode => "OTP_WRONG_CODE",
            OtpError::OtpExpired => "OTP_EXPIRED",
            OtpError::OtpNotFound => "OTP_NOT_FOUND",
            OtpError::Storage { .. } => "OTP_STORAGE_FAILURE",
        }
    }
}

/// Rate limiting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Too many {operation} requests. Please wait before trying again")]
    RateLimited { operation: String },
}

/// Bulk upload errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Retries exhausted on a batch that kept failing transiently
    #[error(
        "Batch {batch_index} failed after {attempts} attempts \
         ({delivered} delivered, {skipped} skipped): {message}"
    )]
    TransientFailure {
        batch_index: usize,
        /// Batches delivered by this run
        delivered: usize,
        /// Batches skipped as already done by an earlier run
        skipped: usize,
        attempts: u32,
        message: String,
    },

    /// The destination rejected a batch; retrying will not help
    #[error("Batch {batch_index} rejected ({delivered} delivered, {skipped} skipped): {message}")]
    PermanentFailure {
        batch_index: usize,
        delivered: usize,
        skipped: usize,
        message: String,
    },
}

impl UploadError {
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::TransientFailure { .. } => "UPLOAD_TRANSIENT_FAILURE",
            UploadError::PermanentFailure { .. } => "UPLOAD_PERMANENT_FAILURE",
        }
    }

    /// Index of the batch that stopped the run
    pub fn batch_index(&self) -> usize {
        match self {
            UploadError::TransientFailure { batch_index, .. }
            | UploadError::PermanentFailure { batch_index, .. } => *batch_index,
        }
    }

    /// Batches delivered by this run before it stopped
    pub fn delivered(&self) -> usize {
        match self {
            UploadError::TransientFailure { delivered, .. }
            | UploadError::PermanentFailure { delivered, .. } => *delivered,
        }
    }

    /// Batches that have succeeded across this run and the runs it resumed
    pub fn completed(&self) -> usize {
        match self {
            UploadError::TransientFailure {
                delivered, skipped, ..
            }
            | UploadError::PermanentFailure {
                delivered, skipped, ..
            } => delivered + skipped,
        }
    }
}
