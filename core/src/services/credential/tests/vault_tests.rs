//! Unit tests for the credential vault

use crate::domain::entities::credential::Credential;
use crate::errors::DomainError;
use crate::services::credential::CredentialVault;

// Minimum cost keeps the suite fast
fn vault() -> CredentialVault {
    CredentialVault::new(4).unwrap()
}

#[test]
fn test_hash_and_verify() {
    let vault = vault();
    let credential = vault.hash("Secret123!").unwrap();

    assert!(credential.as_str().starts_with("$2"));
    assert!(vault.verify("Secret123!", &credential));
    assert!(!vault.verify("Secret124!", &credential));
}

#[test]
fn test_same_password_different_hashes() {
    let vault = vault();
    let first = vault.hash("Secret123!").unwrap();
    let second = vault.hash("Secret123!").unwrap();

    assert_ne!(first, second);
    assert!(vault.verify("Secret123!", &first));
    assert!(vault.verify("Secret123!", &second));
}

#[test]
fn test_hash_accepts_any_string() {
    let vault = vault();
    for input in ["", "ünïcödé", "with space", "x"] {
        let credential = vault.hash(input).unwrap();
        assert!(vault.verify(input, &credential));
    }
}

#[test]
fn test_long_passwords_sharing_prefix_do_not_collide() {
    let vault = vault();
    let prefix = "A".repeat(72);
    let first = format!("{}x", prefix);
    let second = format!("{}y", prefix);

    let credential = vault.hash(&second).unwrap();
    assert!(vault.verify(&second, &credential));
    assert!(!vault.verify(&first, &credential));
    assert!(!vault.verify(&prefix, &credential));
}

#[test]
fn test_long_password_round_trip() {
    let vault = vault();
    let long = "x".repeat(200);
    let credential = vault.hash(&long).unwrap();
    assert!(vault.verify(&long, &credential));
    assert!(!vault.verify(&"x".repeat(199), &credential));
}

#[test]
fn test_malformed_credential_is_false() {
    let vault = vault();
    assert!(!vault.verify("Secret123!", &Credential::from_hash("not-a-bcrypt-hash")));
    assert!(!vault.verify("Secret123!", &Credential::from_hash("")));
}

#[test]
fn test_cost_validation() {
    assert!(matches!(
        CredentialVault::new(3),
        Err(DomainError::Configuration { .. })
    ));
    assert!(matches!(
        CredentialVault::new(32),
        Err(DomainError::Configuration { .. })
    ));
    assert_eq!(CredentialVault::new(31).unwrap().cost(), 31);
}
