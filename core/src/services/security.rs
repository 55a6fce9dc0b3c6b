//! Shared security services built once at startup

use std::sync::Arc;

use super::clock::ClockSource;
use super::credential::CredentialVault;
use super::rate_limit::RateLimiter;
use super::token::TokenService;

/// The stateless and shared-state services every account flow needs
///
/// Constructed once (see the infrastructure bootstrap) and cloned by `Arc`
/// into each consumer.
#[derive(Clone)]
pub struct SecurityCore {
    pub clock: Arc<dyn ClockSource>,
    pub vault: Arc<CredentialVault>,
    pub tokens: Arc<TokenService>,
    pub limiter: Arc<RateLimiter>,
}

impl SecurityCore {
    pub fn new(
        clock: Arc<dyn ClockSource>,
        vault: CredentialVault,
        tokens: TokenService,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            clock,
            vault: Arc::new(vault),
            tokens: Arc::new(tokens),
            limiter: Arc::new(limiter),
        }
    }
}
