//! Configuration for the token service

use cv_shared::config::{JwtConfig, PLACEHOLDER_SECRET};

use crate::domain::entities::token::{RESET_TOKEN_TTL_SECONDS, SESSION_TOKEN_TTL_SECONDS};
use crate::errors::DomainError;

/// Shortest HMAC secret accepted at startup
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub session_ttl_seconds: i64,
    /// Password-reset token lifetime in seconds
    pub reset_ttl_seconds: i64,
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            session_ttl_seconds: SESSION_TOKEN_TTL_SECONDS,
            reset_ttl_seconds: RESET_TOKEN_TTL_SECONDS,
        }
    }

    /// Rejects a missing, short or placeholder secret
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        let secret = self.jwt_secret.trim();
        let problem = if secret.is_empty() {
            Some(String::from("JWT_SECRET is not set"))
        } else if secret == PLACEHOLDER_SECRET {
            Some(String::from("JWT_SECRET is still the placeholder value"))
        } else if self.jwt_secret.len() < MIN_SECRET_BYTES {
            Some(format!(
                "JWT_SECRET must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                self.jwt_secret.len()
            ))
        } else if self.session_ttl_seconds <= 0 || self.reset_ttl_seconds <= 0 {
            Some(String::from("token lifetimes must be positive"))
        } else {
            None
        };

        match problem {
            Some(message) => Err(DomainError::Configuration { message }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("reset_ttl_seconds", &self.reset_ttl_seconds)
            .finish()
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            session_ttl_seconds: config.session_ttl_seconds,
            reset_ttl_seconds: config.reset_ttl_seconds,
        }
    }
}
