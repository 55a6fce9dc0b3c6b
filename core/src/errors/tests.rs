//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, OtpError, RateLimitError, TokenError, UploadError};

#[test]
fn test_bridged_errors_keep_their_message() {
    let error: DomainError = TokenError::TokenExpired.into();
    assert_eq!(error.to_string(), "Token expired");

    let error: DomainError = AuthError::WeakPassword {
        reason: "too short".to_string(),
    }
    .into();
    assert!(error.to_string().contains("too short"));
}

#[test]
fn test_error_codes() {
    assert_eq!(DomainError::from(AuthError::InvalidCredentials).code(), "INVALID_CREDENTIALS");
    assert_eq!(DomainError::from(OtpError::OtpExpired).code(), "OTP_EXPIRED");
    assert_eq!(
        DomainError::Configuration {
            message: "JWT_SECRET".to_string()
        }
        .code(),
        "CONFIGURATION_ERROR"
    );
}

#[test]
fn test_http_status_mapping() {
    let limited: DomainError = RateLimitError::RateLimited {
        operation: "otp:resend".to_string(),
    }
    .into();
    assert_eq!(limited.http_status(), 429);
    assert_eq!(DomainError::from(AuthError::AccountNotVerified).http_status(), 403);
    assert_eq!(DomainError::from(TokenError::InvalidSignature).http_status(), 401);
    assert_eq!(DomainError::from(OtpError::OtpWrongCode).http_status(), 400);
    assert_eq!(DomainError::from(AuthError::NotAccountOwner).http_status(), 403);
    assert_eq!(DomainError::from(AuthError::UsernameTaken).http_status(), 400);
}

#[test]
fn test_upload_error_accessors() {
    let error = UploadError::TransientFailure {
        batch_index: 4,
        delivered: 3,
        skipped: 2,
        attempts: 10,
        message: "503 Service Unavailable".to_string(),
    };
    assert_eq!(error.batch_index(), 4);
    assert_eq!(error.delivered(), 3);
    assert_eq!(error.completed(), 5);
    assert!(error.to_string().contains("after 10 attempts"));
}
