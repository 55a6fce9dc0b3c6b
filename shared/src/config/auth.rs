//! Authentication and account-security configuration

use serde::{Deserialize, Serialize};

/// Placeholder secret that must never reach a running service
pub const PLACEHOLDER_SECRET: &str = "your-secret-key-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret for signing tokens. Empty means "not configured".
    #[serde(default)]
    pub secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,

    /// Password-reset capability token lifetime in seconds
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            session_ttl_seconds: default_session_ttl(),
            reset_ttl_seconds: default_reset_ttl(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if the secret is missing or left at the placeholder
    pub fn is_secret_unset(&self) -> bool {
        self.secret.trim().is_empty() || self.secret == PLACEHOLDER_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// One-time passcode configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in seconds
    #[serde(default = "default_otp_ttl")]
    pub ttl_seconds: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_otp_ttl(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// OTP configuration
    #[serde(default)]
    pub otp: OtpConfig,
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// A missing `JWT_SECRET` is not an error here; the token service
    /// rejects it when it is constructed at startup.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .or_else(|_| std::env::var("SECRET_KEY"))
            .unwrap_or_default();
        let session_ttl_seconds = parse_env("JWT_SESSION_TTL_SECONDS", default_session_ttl());
        let reset_ttl_seconds = parse_env("JWT_RESET_TTL_SECONDS", default_reset_ttl());

        Self {
            jwt: JwtConfig {
                secret,
                session_ttl_seconds,
                reset_ttl_seconds,
            },
            password: PasswordConfig {
                bcrypt_cost: parse_env("BCRYPT_COST", default_bcrypt_cost()),
            },
            otp: OtpConfig {
                ttl_seconds: parse_env("OTP_TTL_SECONDS", default_otp_ttl()),
            },
        }
    }
}

pub(crate) fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn default_session_ttl() -> i64 {
    3600
}

fn default_reset_ttl() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_otp_ttl() -> i64 {
    600
}
