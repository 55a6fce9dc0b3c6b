//! Password hashing and password policy
//!
//! - `CredentialVault` hashes and verifies passwords with bcrypt
//! - `check_password_policy` is the pure policy predicate applied before hashing

mod policy;
mod vault;

#[cfg(test)]
mod tests;

pub use policy::{check_password_policy, ALLOWED_SYMBOLS, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use vault::CredentialVault;
