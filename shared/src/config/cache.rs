//! Shared counter store (Redis) configuration

use serde::{Deserialize, Serialize};

/// Redis configuration for the shared counter store
///
/// `url == None` means no shared store is configured and the rate limiter
/// runs on its in-process table only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Connection attempts at startup before giving up on the shared store
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,

    /// Prefix applied to every key written to the shared store
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            connection_timeout: default_connection_timeout(),
            connect_attempts: default_connect_attempts(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let key_prefix =
            std::env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| default_key_prefix());

        Self {
            url,
            key_prefix,
            connection_timeout: super::auth::parse_env(
                "REDIS_CONNECTION_TIMEOUT",
                default_connection_timeout(),
            ),
            connect_attempts: super::auth::parse_env(
                "REDIS_CONNECT_ATTEMPTS",
                default_connect_attempts(),
            ),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_connect_attempts() -> u32 {
    3
}

fn default_key_prefix() -> String {
    String::from("cineverse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_shared_store() {
        let config = CacheConfig::default();
        assert!(config.url.is_none());
        assert_eq!(config.make_key("rl:abc"), "cineverse:rl:abc");
    }

    #[test]
    fn test_empty_prefix() {
        let config = CacheConfig::new("redis://localhost:6379").with_prefix("");
        assert_eq!(config.make_key("rl:abc"), "rl:abc");
    }

    #[test]
    fn test_blank_redis_url_is_ignored() {
        temp_env::with_var("REDIS_URL", Some("  "), || {
            assert!(CacheConfig::from_env().url.is_none());
        });
    }
}
