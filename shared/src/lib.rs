//! Shared configuration and helpers for CineVerse services
//!
//! - Configuration types loaded from the environment
//! - Identifier validation and log masking helpers

pub mod config;
pub mod utils;

pub use config::{
    AppConfig, AuthConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    OtpConfig, PasswordConfig, RateLimitConfig, UploadConfig, WindowLimit,
};
pub use utils::validation;
