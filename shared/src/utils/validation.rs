//! Identifier validation and log-safe formatting

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
});

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._\-]{3,32}$").unwrap());

/// Normalize an email for lookups (trimmed, lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Login identifiers containing `@` are emails, everything else a username
pub fn is_email_identifier(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Check a user-chosen username: 3 to 32 letters, digits, `.`, `_` or `-`
///
/// Excludes `@` so the name can never be read as an email at login.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Local part of an email, used as the base for a generated username
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Mask an email for logs (e.g., a***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => String::from("***"),
    }
}

/// Mask an arbitrary login identifier (email or username) for logs
pub fn mask_identifier(identifier: &str) -> String {
    if is_email_identifier(identifier) {
        return mask_email(identifier);
    }
    let visible: String = identifier.chars().take(2).collect();
    format!("{}***", visible)
}
