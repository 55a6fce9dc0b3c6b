//! # Infrastructure Layer
//!
//! Concrete adapters for the CineVerse core:
//! - **Cache**: Redis client used as the shared rate-limit counter store
//! - **Bulk**: HTTP destination for the ingestion pipeline
//! - **Mailer**: logging mailer for development and tests
//! - **Bootstrap**: builds the security services from configuration and
//!   fails fast on misconfiguration

pub mod bootstrap;
pub mod bulk;
pub mod cache;
pub mod mailer;
pub mod services;

pub use bootstrap::{build_security_core, build_uploader};
pub use bulk::HttpBulkDestination;
pub use cache::RedisClient;
pub use mailer::LogMailer;
pub use services::rate_limit::RedisCounterStore;

use cv_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_configuration() {
        let error: DomainError = InfrastructureError::Config("REDIS_URL is not set".into()).into();
        assert!(matches!(error, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let error: DomainError = InfrastructureError::Mail("smtp down".into()).into();
        match error {
            DomainError::Internal { message } => assert!(message.contains("smtp down")),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
