//! Infrastructure implementations of core service seams

pub mod rate_limit;
