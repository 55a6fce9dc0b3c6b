//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, OtpError, RateLimitError, TokenError, UploadError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Raised by constructors and bootstrap code, never per request
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl DomainError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Configuration { .. } => "CONFIGURATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(e) => e.code(),
            DomainError::Token(e) => e.code(),
            DomainError::Otp(e) => e.code(),
            DomainError::RateLimit(_) => "RATE_LIMITED",
            DomainError::Upload(e) => e.code(),
        }
    }

    /// HTTP status a transport layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Configuration { .. } | DomainError::Internal { .. } => 500,
            DomainError::Auth(e) => match e {
                AuthError::InvalidCredentials | AuthError::MissingBearer => 401,
                AuthError::AccountNotVerified | AuthError::NotAccountOwner => 403,
                AuthError::AccountNotFound => 404,
                AuthError::WeakPassword { .. }
                | AuthError::EmailAlreadyRegistered
                | AuthError::UsernameTaken => 400,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => 500,
            DomainError::Token(_) => 401,
            DomainError::Otp(OtpError::Storage { .. }) => 500,
            DomainError::Otp(_) => 400,
            DomainError::RateLimit(_) => 429,
            DomainError::Upload(_) => 502,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
