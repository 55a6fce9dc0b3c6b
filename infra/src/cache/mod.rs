//! Redis connectivity for the shared rate-limit counters

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

pub use cv_shared::config::CacheConfig;
