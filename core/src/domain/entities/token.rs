//! Claim sets carried by signed tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::AccountId;
use crate::errors::TokenError;

/// Session token lifetime (1 hour)
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 3600;

/// Password-reset capability lifetime (1 hour)
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;

/// Purpose tag of bearer session tokens
pub const SESSION_PURPOSE: &str = "session";

/// Purpose tag of password-reset capability tokens
pub const PASSWORD_RESET_PURPOSE: &str = "password-reset";

/// Claims structure for session tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account id, as a string)
    pub sub: String,

    pub username: String,

    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Always `"session"`
    pub purpose: String,
}

impl SessionClaims {
    /// Creates new session claims
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's id
    /// * `username` - Login name
    /// * `email` - Account email
    /// * `now` - Issue time
    /// * `ttl` - Token lifetime
    pub fn new(
        account_id: AccountId,
        username: &str,
        email: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: account_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            purpose: SESSION_PURPOSE.to_string(),
        }
    }

    /// Gets the account id from the subject claim
    pub fn account_id(&self) -> Result<AccountId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::TokenMalformed)
    }

    /// Valid while `now <= exp`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// Claims structure for single-purpose capability tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityClaims {
    /// Action this token grants, e.g. `"password-reset"`
    pub purpose: String,

    /// Payload the action applies to (the account email for resets)
    pub sub: String,

    pub iat: i64,

    pub exp: i64,
}

impl CapabilityClaims {
    pub fn new(purpose: &str, payload: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            purpose: purpose.to_string(),
            sub: payload.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_session_claims() {
        let claims = SessionClaims::new(7, "ana", "ana@x.com", at(1000), Duration::seconds(3600));
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 4600);
        assert_eq!(claims.purpose, SESSION_PURPOSE);
        assert_eq!(claims.account_id().unwrap(), 7);
        assert!(!claims.is_expired(at(4600)));
        assert!(claims.is_expired(at(4601)));
    }

    #[test]
    fn test_unique_jti() {
        let a = SessionClaims::new(1, "a", "a@x.com", at(0), Duration::seconds(60));
        let b = SessionClaims::new(1, "a", "a@x.com", at(0), Duration::seconds(60));
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_non_numeric_subject() {
        let mut claims = SessionClaims::new(1, "a", "a@x.com", at(0), Duration::seconds(60));
        claims.sub = "abc".to_string();
        assert_eq!(claims.account_id(), Err(TokenError::TokenMalformed));
    }

    #[test]
    fn test_capability_claims_serialization() {
        let claims = CapabilityClaims::new(
            PASSWORD_RESET_PURPOSE,
            "ana@x.com",
            at(0),
            Duration::seconds(3600),
        );
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["purpose"], "password-reset");
        assert_eq!(json["sub"], "ana@x.com");
        assert_eq!(json["exp"], 3600);
    }
}
