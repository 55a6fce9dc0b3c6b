//! Configuration for the account service

use chrono::Duration;
use cv_shared::config::AppConfig;

use crate::domain::entities::otp::DEFAULT_OTP_TTL_SECONDS;
use crate::services::rate_limit::LimitRule;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Lifetime of issued OTP codes
    pub otp_ttl: Duration,
    /// Limit on OTP resends per identifier
    pub otp_resend_limit: LimitRule,
    /// Limit on chat turns per account
    pub chat_limit: LimitRule,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            otp_ttl: Duration::seconds(DEFAULT_OTP_TTL_SECONDS),
            otp_resend_limit: LimitRule::OTP_RESEND,
            chat_limit: LimitRule::CHAT,
        }
    }
}

impl From<&AppConfig> for AccountServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            otp_ttl: Duration::seconds(config.auth.otp.ttl_seconds),
            otp_resend_limit: config.rate_limit.otp_resend.into(),
            chat_limit: config.rate_limit.chat.into(),
        }
    }
}
