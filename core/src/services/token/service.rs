//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::token::{
    CapabilityClaims, SessionClaims, PASSWORD_RESET_PURPOSE, SESSION_PURPOSE,
};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 session and capability tokens
///
/// Stateless apart from the signing keys; `Send + Sync` and shared by `Arc`.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Secret is usable
    /// * `Err(DomainError::Configuration)` - Secret missing, shorter than 32 bytes,
    ///   or left at the placeholder default
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the caller's clock, not the system time
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Session lifetime in seconds
    pub fn session_ttl_seconds(&self) -> i64 {
        self.config.session_ttl_seconds
    }

    /// Issues a session token
    ///
    /// # Arguments
    ///
    /// * `account_id` - Subject of the token
    /// * `username` - Login name carried in the claims
    /// * `email` - Account email carried in the claims
    /// * `now` - Issue time; the token expires `session_ttl_seconds` later
    pub fn issue_session(
        &self,
        account_id: AccountId,
        username: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims = SessionClaims::new(
            account_id,
            username,
            email,
            now,
            Duration::seconds(self.config.session_ttl_seconds),
        );
        self.encode_jwt(&claims)
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(SessionClaims)` - Signature valid, purpose `"session"`, `now <= exp`
    /// * `Err(TokenError::TokenMalformed)` - Not a decodable JWT or missing claims
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key or algorithm
    /// * `Err(TokenError::TokenPurposeMismatch)` - A capability token was presented
    /// * `Err(TokenError::TokenExpired)` - `now > exp`
    pub fn verify_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, DomainError> {
        self.verify_claims(token, SESSION_PURPOSE, now)
    }

    /// Issues a capability token for a single purpose
    ///
    /// Password resets use the configured reset lifetime; other purposes
    /// share the same lifetime.
    pub fn issue_capability(
        &self,
        purpose: &str,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims = CapabilityClaims::new(
            purpose,
            payload,
            now,
            Duration::seconds(self.config.reset_ttl_seconds),
        );
        self.encode_jwt(&claims)
    }

    /// Issues a password-reset capability for an email
    pub fn issue_password_reset(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        self.issue_capability(PASSWORD_RESET_PURPOSE, email, now)
    }

    /// Verifies a capability token and returns its payload
    ///
    /// Same failure semantics as [`verify_session`](Self::verify_session),
    /// with `TokenPurposeMismatch` when the purpose differs from
    /// `expected_purpose`.
    pub fn verify_capability(
        &self,
        token: &str,
        expected_purpose: &str,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims: CapabilityClaims = self.verify_claims(token, expected_purpose, now)?;
        Ok(claims.sub)
    }

    /// Encodes claims into a JWT
    fn encode_jwt<T: Serialize>(&self, claims: &T) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Signature, then purpose, then expiry, then claim shape
    fn verify_claims<T: DeserializeOwned>(
        &self,
        token: &str,
        expected_purpose: &str,
        now: DateTime<Utc>,
    ) -> Result<T, DomainError> {
        let raw = decode::<Value>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::Token(map_decode_error(e.kind())))?
            .claims;

        let found = raw.get("purpose").and_then(Value::as_str).unwrap_or("");
        if found != expected_purpose {
            return Err(DomainError::Token(TokenError::TokenPurposeMismatch {
                expected: expected_purpose.to_string(),
                found: found.to_string(),
            }));
        }

        let exp = raw
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(DomainError::Token(TokenError::TokenMalformed))?;
        if now.timestamp() > exp {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        serde_json::from_value(raw).map_err(|_| DomainError::Token(TokenError::TokenMalformed))
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::TokenMalformed,
    }
}
