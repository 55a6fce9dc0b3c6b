//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing, password hashing and OTP settings
//! - `cache` - shared counter store (Redis) settings
//! - `environment` - environment detection and logging configuration
//! - `rate_limit` - per-operation request limits
//! - `upload` - bulk index upload settings

pub mod auth;
pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, OtpConfig, PasswordConfig, PLACEHOLDER_SECRET};
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, WindowLimit};
pub use upload::UploadConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Shared counter store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Bulk upload configuration
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Reads `.env` and the environment-specific `.env.<env>` file first when
    /// they exist; variables already set in the process win.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        Self {
            environment,
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            upload: UploadConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_from_env() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", Some("production")),
                ("JWT_SECRET", Some("0123456789abcdef0123456789abcdef")),
                ("REDIS_URL", Some("redis://cache:6379")),
                ("LOG_LEVEL", None),
                ("LOG_FORMAT", None),
            ],
            || {
                let config = AppConfig::from_env();
                assert!(config.environment.is_production());
                assert_eq!(config.auth.jwt.secret.len(), 32);
                assert_eq!(config.cache.url.as_deref(), Some("redis://cache:6379"));
                assert_eq!(config.logging.format, LogFormat::Json);
            },
        );
    }
}
