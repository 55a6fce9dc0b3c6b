//! Redis-backed counter store for the rate limiter

pub mod counter_store;


pub use counter_store::RedisCounterStore;
