//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::auth::parse_env;

/// A single fixed-window limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowLimit {
    /// Requests allowed inside one window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl WindowLimit {
    pub const fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// OTP resend limit per identifier
    #[serde(default = "default_otp_resend")]
    pub otp_resend: WindowLimit,

    /// Chat turn limit per account
    #[serde(default = "default_chat")]
    pub chat: WindowLimit,

    /// Expired in-process windows are swept once this many seconds have
    /// passed since the previous sweep
    #[serde(default = "default_prune_interval")]
    pub prune_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            otp_resend: default_otp_resend(),
            chat: default_chat(),
            prune_interval_seconds: default_prune_interval(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            otp_resend: WindowLimit::new(
                parse_env("OTP_RESEND_MAX", defaults.otp_resend.max_requests),
                parse_env("OTP_RESEND_WINDOW_SECONDS", defaults.otp_resend.window_seconds),
            ),
            chat: WindowLimit::new(
                parse_env("CHAT_RATE_MAX", defaults.chat.max_requests),
                parse_env("CHAT_RATE_WINDOW_SECONDS", defaults.chat.window_seconds),
            ),
            prune_interval_seconds: parse_env(
                "RATE_LIMIT_PRUNE_INTERVAL_SECONDS",
                defaults.prune_interval_seconds,
            ),
        }
    }
}

fn default_otp_resend() -> WindowLimit {
    WindowLimit::new(5, 3600)
}

fn default_chat() -> WindowLimit {
    WindowLimit::new(30, 60)
}

fn default_prune_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = RateLimitConfig::default();
        assert_eq!(config.otp_resend, WindowLimit::new(5, 3600));
        assert_eq!(config.chat, WindowLimit::new(30, 60));
    }

    #[test]
    fn test_from_env_overrides_single_field() {
        temp_env::with_vars(
            [("CHAT_RATE_MAX", Some("10")), ("CHAT_RATE_WINDOW_SECONDS", None)],
            || {
                let config = RateLimitConfig::from_env();
                assert_eq!(config.chat, WindowLimit::new(10, 60));
                assert_eq!(config.otp_resend, WindowLimit::new(5, 3600));
            },
        );
    }
}
