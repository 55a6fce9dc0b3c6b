//! Value objects returned by the account flows.

pub mod account_profile;

pub use account_profile::{AccountProfile, LoginResponse};
