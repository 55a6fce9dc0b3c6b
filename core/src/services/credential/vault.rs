//! bcrypt-backed credential vault

use sha2::{Digest, Sha256};

use crate::domain::entities::credential::Credential;
use crate::errors::DomainError;

/// Lowest and highest work factor bcrypt accepts
const COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Hashes and verifies passwords; independent of storage
///
/// bcrypt reads at most 72 bytes, so the password is first reduced to its
/// hex SHA-256 digest (64 bytes) and every byte of the input counts.
/// Stateless apart from the work factor, so a single instance is shared
/// behind an `Arc`. Both operations are CPU-bound; async callers should run
/// them through `tokio::task::spawn_blocking`.
#[derive(Debug, Clone)]
pub struct CredentialVault {
    cost: u32,
}

impl CredentialVault {
    /// Creates a vault with the given bcrypt cost
    ///
    /// # Returns
    ///
    /// * `Ok(CredentialVault)` - Cost is within 4..=31
    /// * `Err(DomainError::Configuration)` - Cost is out of range
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !COST_RANGE.contains(&cost) {
            return Err(DomainError::Configuration {
                message: format!(
                    "bcrypt cost must be between {} and {}, got {}",
                    COST_RANGE.start(),
                    COST_RANGE.end(),
                    cost
                ),
            });
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a password with a fresh random salt
    ///
    /// Equal inputs give different outputs; compare with [`verify`](Self::verify).
    /// With a validated cost bcrypt does not fail; a library error is still
    /// surfaced as `DomainError::Internal` instead of panicking.
    pub fn hash(&self, password: &str) -> Result<Credential, DomainError> {
        bcrypt::hash(prehash(password), self.cost)
            .map(Credential::from_hash)
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    /// Checks a password against a stored credential
    ///
    /// Returns `false` on mismatch and on a malformed stored credential.
    pub fn verify(&self, password: &str, credential: &Credential) -> bool {
        match bcrypt::verify(prehash(password), credential.as_str()) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event = "credential_malformed",
                    "Stored credential could not be parsed"
                );
                false
            }
        }
    }
}

fn prehash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
