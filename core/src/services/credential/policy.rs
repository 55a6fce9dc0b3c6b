//! Password policy predicate

use crate::errors::AuthError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// Symbols accepted besides ASCII letters and digits
pub const ALLOWED_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/~";

/// Checks a candidate password against the policy
///
/// 8 to 64 characters, at least one letter and one digit, and nothing but
/// ASCII letters, digits and [`ALLOWED_SYMBOLS`].
pub fn check_password_policy(password: &str) -> Result<(), AuthError> {
    let weak = |reason: &str| {
        Err(AuthError::WeakPassword {
            reason: reason.to_string(),
        })
    };

    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return weak("Password must be at least 8 characters long");
    }
    if length > MAX_PASSWORD_LENGTH {
        return weak("Password must be at most 64 characters long");
    }
    if let Some(bad) = password
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !ALLOWED_SYMBOLS.contains(*c))
    {
        let shown = if bad.is_whitespace() {
            String::from("whitespace")
        } else {
            format!("'{}'", bad)
        };
        return Err(AuthError::WeakPassword {
            reason: format!("Password contains an unsupported character: {}", shown),
        });
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return weak("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("Password must contain at least one digit");
    }
    Ok(())
}
