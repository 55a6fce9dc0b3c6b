//! Stored password credential.

use std::fmt;

/// Opaque password hash in bcrypt's modular crypt format
///
/// The salt and cost travel inside the string. The value is never logged
/// (`Debug` is redacted) and deliberately does not implement `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a hash produced by the credential vault or loaded from storage
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::from_hash("$2b$04$abcdefghijklmnopqrstuv");
        let printed = format!("{:?}", credential);
        assert_eq!(printed, "Credential([REDACTED])");
        assert!(!printed.contains("$2b$"));
    }
}
