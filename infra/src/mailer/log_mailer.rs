//! Logging mailer
//!
//! Writes every outbound message to the tracing log instead of sending it.
//! Used in development and tests; secrets are only logged when
//! `reveal_secrets` is on.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cv_core::services::account::Mailer;
use cv_shared::validation::mask_email;

/// Mailer that logs messages
///
/// This implementation:
/// - Logs each message with a masked recipient and a generated message id
/// - Tracks the message count for tests
/// - Can simulate delivery failures
#[derive(Clone, Default)]
pub struct LogMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether codes and tokens appear in the log
    reveal_secrets: bool,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log codes and reset tokens at debug level (development only)
    pub fn revealing_secrets() -> Self {
        Self {
            reveal_secrets: true,
            ..Self::default()
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn send(&self, kind: &'static str, email: &str, secret: &str) -> Result<(), String> {
        let masked = mask_email(email);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(kind, email = %masked, "Log mailer simulating failure");
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mailer",
            provider = "log",
            kind,
            email = %masked,
            message_id = %message_id,
            count,
            "Mail sent (log)"
        );
        if self.reveal_secrets {
            debug!(target: "mailer", kind, email = %masked, secret, "Mail secret");
        }
        Ok(())
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_welcome(&self, email: &str, _username: &str, code: &str) -> Result<(), String> {
        self.send("welcome", email, code)
    }

    async fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        self.send("otp", email, code)
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        self.send("password_reset", email, token)
    }
}
