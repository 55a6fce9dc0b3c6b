//! Service construction from configuration
//!
//! Everything here runs once at startup. Misconfiguration (missing or
//! placeholder JWT secret, bcrypt cost out of range, unparsable Redis URL,
//! incomplete bulk endpoint settings) fails fast. An unreachable Redis only
//! degrades the rate limiter to its in-process store.

use std::sync::Arc;

use cv_core::errors::DomainResult;
use cv_core::services::rate_limit::{CounterStore, MemoryCounterStore, RateLimiter};
use cv_core::services::upload::{BackoffUploader, RetryPolicy};
use cv_core::services::{
    ClockSource, CredentialVault, SecurityCore, SystemClock, TokenService, TokenServiceConfig,
};
use cv_shared::config::{AppConfig, CacheConfig, UploadConfig};

use crate::bulk::HttpBulkDestination;
use crate::cache::RedisClient;
use crate::services::rate_limit::RedisCounterStore;
use crate::InfrastructureError;

/// Build the clock, vault, token service and rate limiter
///
/// # Returns
/// * `Ok(SecurityCore)` - Services ready to share across handlers
/// * `Err(DomainError::Configuration)` - Secret, cost or Redis URL invalid
pub async fn build_security_core(config: &AppConfig) -> DomainResult<SecurityCore> {
    if config.auth.jwt.is_secret_unset() {
        tracing::error!(
            event = "jwt_secret_unset",
            "JWT_SECRET is missing or still the placeholder value"
        );
    }
    let tokens = TokenService::new(TokenServiceConfig::from(&config.auth.jwt))?;
    let vault = CredentialVault::new(config.auth.password.bcrypt_cost)?;
    let limiter =
        build_rate_limiter(&config.cache, config.rate_limit.prune_interval_seconds).await?;

    tracing::info!(
        environment = %config.environment,
        bcrypt_cost = vault.cost(),
        shared_rate_limits = limiter.has_shared_store(),
        event = "security_core_ready",
        "Security services initialized"
    );

    Ok(SecurityCore::new(
        Arc::new(SystemClock) as Arc<dyn ClockSource>,
        vault,
        tokens,
        limiter,
    ))
}

/// Rate limiter over Redis when configured and reachable, in-process otherwise
pub async fn build_rate_limiter(
    cache: &CacheConfig,
    prune_interval_seconds: u64,
) -> Result<RateLimiter, InfrastructureError> {
    let local = MemoryCounterStore::new(prune_interval_seconds);

    if cache.url.is_none() {
        tracing::info!(
            event = "rate_limit_in_process",
            "REDIS_URL not set, rate limits are per process"
        );
        return Ok(RateLimiter::new(None, local));
    }

    match RedisClient::connect(cache.clone()).await {
        Ok(client) => {
            let shared: Arc<dyn CounterStore> = Arc::new(RedisCounterStore::new(client));
            Ok(RateLimiter::new(Some(shared), local))
        }
        Err(InfrastructureError::Config(message)) => Err(InfrastructureError::Config(message)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                event = "rate_limit_store_unavailable",
                "Redis unreachable, rate limits are per process"
            );
            Ok(RateLimiter::new(None, local))
        }
    }
}

/// Uploader delivering to the configured HTTP bulk endpoint
pub fn build_uploader(
    config: &UploadConfig,
) -> Result<BackoffUploader<HttpBulkDestination>, InfrastructureError> {
    let destination = HttpBulkDestination::new(config)?;
    Ok(BackoffUploader::new(
        Arc::new(destination),
        RetryPolicy::from(config),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_core::errors::DomainError;
    use cv_shared::config::{JwtConfig, PLACEHOLDER_SECRET};

    const SECRET: &str = "bootstrap-secret-with-more-than-32-bytes";

    fn app_config(secret: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new(secret);
        config.auth.password.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn test_builds_in_process_core() {
        let core = build_security_core(&app_config(SECRET)).await.unwrap();
        assert!(!core.limiter.has_shared_store());
        assert_eq!(core.vault.cost(), 4);
    }

    #[tokio::test]
    async fn test_rejects_unset_secret() {
        for secret in ["", PLACEHOLDER_SECRET, "too-short"] {
            let result = build_security_core(&app_config(secret)).await;
            assert!(
                matches!(result, Err(DomainError::Configuration { .. })),
                "secret {:?} should be rejected",
                secret
            );
        }
    }

    #[tokio::test]
    async fn test_rejects_bcrypt_cost_out_of_range() {
        let mut config = app_config(SECRET);
        config.auth.password.bcrypt_cost = 3;
        let result = build_security_core(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_rejects_invalid_redis_url() {
        let mut config = app_config(SECRET);
        config.cache = CacheConfig::new("invalid://url");
        let result = build_security_core(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_redis_degrades() {
        let mut cache = CacheConfig::new("redis://127.0.0.1:1");
        cache.connect_attempts = 1;
        cache.connection_timeout = 1;

        let limiter = build_rate_limiter(&cache, 60).await.unwrap();
        assert!(!limiter.has_shared_store());
    }

    #[test]
    fn test_build_uploader_requires_endpoint() {
        assert!(matches!(
            build_uploader(&UploadConfig::default()),
            Err(InfrastructureError::Config(_))
        ));

        let config = UploadConfig {
            endpoint: "https://index.example.com".to_string(),
            api_key: "key".to_string(),
            max_attempts: 3,
            ..Default::default()
        };
        let uploader = build_uploader(&config).unwrap();
        assert_eq!(uploader.policy().max_attempts, 3);
    }
}
