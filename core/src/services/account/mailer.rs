//! Outbound mail seam

use async_trait::async_trait;

/// Trait for transactional email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Welcome message carrying the username and the signup code
    async fn send_welcome(&self, email: &str, username: &str, code: &str) -> Result<(), String>;

    /// Standalone verification code
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), String>;

    /// Password-reset link or token
    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String>;
}
