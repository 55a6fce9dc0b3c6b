//! Limit presets for rate-limited operations

use cv_shared::config::WindowLimit;

/// Key prefix for OTP resend requests
pub const OTP_RESEND_OPERATION: &str = "otp:resend";

/// Key prefix for chat turns
pub const CHAT_OPERATION: &str = "chat";

/// Requests allowed per fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRule {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl LimitRule {
    /// 5 resends per hour per identifier
    pub const OTP_RESEND: LimitRule = LimitRule::new(5, 3600);

    /// 30 chat turns per minute per account
    pub const CHAT: LimitRule = LimitRule::new(30, 60);

    pub const fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

impl From<WindowLimit> for LimitRule {
    fn from(limit: WindowLimit) -> Self {
        Self::new(limit.max_requests, limit.window_seconds)
    }
}
