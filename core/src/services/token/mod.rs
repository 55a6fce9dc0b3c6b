//! Token service module for JWT management
//!
//! - Session token issuance and verification (HS256)
//! - Single-purpose capability tokens (password reset)
//! - Expiry checked against an injected `now`

mod config;
mod service;


pub use config::{TokenServiceConfig, MIN_SECRET_BYTES};
pub use service::TokenService;
