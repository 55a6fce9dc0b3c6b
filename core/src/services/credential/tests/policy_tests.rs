//! Unit tests for the password policy

use crate::errors::AuthError;
use crate::services::credential::check_password_policy;

fn reason(password: &str) -> String {
    match check_password_policy(password) {
        Err(AuthError::WeakPassword { reason }) => reason,
        other => panic!("expected WeakPassword, got {:?}", other),
    }
}

#[test]
fn test_accepts_valid_passwords() {
    assert!(check_password_policy("abcdefg1").is_ok());
    assert!(check_password_policy("Secret123!").is_ok());
    assert!(check_password_policy("a1!@#$%^&*()-_=+[]{};:,.<>?/~").is_ok());
    assert!(check_password_policy(&format!("a1{}", "x".repeat(62))).is_ok());
}

#[test]
fn test_length_bounds() {
    assert!(reason("abc1234").contains("at least 8"));
    assert!(reason(&format!("a1{}", "x".repeat(63))).contains("at most 64"));
}

#[test]
fn test_requires_letter_and_digit() {
    assert!(reason("12345678").contains("letter"));
    assert!(reason("abcdefgh").contains("digit"));
}

#[test]
fn test_rejects_unsupported_characters() {
    assert!(reason("abc 12345").contains("whitespace"));
    assert!(reason("abc12345é").contains("'é'"));
    assert!(reason("abc12345|").contains("'|'"));
    assert!(reason("abc12345\"").contains("unsupported"));
}
