//! Unit tests for the OTP challenge

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::OtpError;
use crate::services::otp::{MemoryOtpStore, OtpChallenge, OtpOutcome, OtpStore};

use super::mocks::FailingOtpStore;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn challenge() -> (OtpChallenge<MemoryOtpStore>, Arc<MemoryOtpStore>) {
    let store = Arc::new(MemoryOtpStore::new());
    (OtpChallenge::new(store.clone()), store)
}

/// Any six-digit code other than `code`
fn other_code(code: &str) -> String {
    if code == "000000" {
        "000001".to_string()
    } else {
        "000000".to_string()
    }
}

#[tokio::test]
async fn test_issue_then_verify() {
    let (otp, store) = challenge();
    let code = otp.issue(1, at(0)).await.unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(store.load(1).await.unwrap().unwrap().expires_at, at(600));

    assert_eq!(otp.verify(1, &code, at(600)).await.unwrap(), OtpOutcome::Verified);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_replay_after_success() {
    let (otp, _) = challenge();
    let code = otp.issue(1, at(0)).await.unwrap();

    assert_eq!(otp.verify(1, &code, at(10)).await.unwrap(), OtpOutcome::Verified);
    assert_eq!(otp.verify(1, &code, at(11)).await.unwrap(), OtpOutcome::NoChallenge);
}

#[tokio::test]
async fn test_wrong_code_keeps_record() {
    let (otp, store) = challenge();
    let code = otp.issue(1, at(0)).await.unwrap();

    let wrong = other_code(&code);
    assert_eq!(otp.verify(1, &wrong, at(10)).await.unwrap(), OtpOutcome::WrongCode);
    assert_eq!(store.len(), 1);
    assert_eq!(otp.verify(1, &code, at(20)).await.unwrap(), OtpOutcome::Verified);
}

#[tokio::test]
async fn test_expired_code_is_cleared() {
    let (otp, store) = challenge();
    let code = otp.issue(1, at(0)).await.unwrap();

    assert_eq!(otp.verify(1, &code, at(601)).await.unwrap(), OtpOutcome::Expired);
    assert!(store.is_empty());
    assert_eq!(otp.verify(1, &code, at(602)).await.unwrap(), OtpOutcome::NoChallenge);
}

#[tokio::test]
async fn test_wrong_code_after_expiry_is_wrong_code() {
    let (otp, store) = challenge();
    let code = otp.issue(1, at(0)).await.unwrap();

    let wrong = other_code(&code);
    assert_eq!(otp.verify(1, &wrong, at(700)).await.unwrap(), OtpOutcome::WrongCode);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_reissue_replaces_pending_code() {
    let (otp, store) = challenge();
    let first = otp.issue(1, at(0)).await.unwrap();
    let mut second = otp.issue(1, at(5)).await.unwrap();
    while second == first {
        second = otp.issue(1, at(5)).await.unwrap();
    }

    assert_eq!(store.len(), 1);
    assert_eq!(otp.verify(1, &first, at(10)).await.unwrap(), OtpOutcome::WrongCode);
    assert_eq!(otp.verify(1, &second, at(10)).await.unwrap(), OtpOutcome::Verified);
}

#[tokio::test]
async fn test_no_challenge() {
    let (otp, _) = challenge();
    assert_eq!(otp.verify(9, "123456", at(0)).await.unwrap(), OtpOutcome::NoChallenge);
}

#[tokio::test]
async fn test_accounts_are_independent() {
    let (otp, _) = challenge();
    let code_a = otp.issue(1, at(0)).await.unwrap();
    let code_b = otp.issue(2, at(0)).await.unwrap();

    assert_eq!(otp.verify(1, &code_a, at(1)).await.unwrap(), OtpOutcome::Verified);
    assert_eq!(otp.verify(2, &code_b, at(1)).await.unwrap(), OtpOutcome::Verified);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_verification_succeeds_once() {
    let store = Arc::new(MemoryOtpStore::new());
    let otp = Arc::new(OtpChallenge::new(store));
    let code = otp.issue(1, at(0)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let otp = otp.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move { otp.verify(1, &code, at(1)).await.unwrap() }));
    }

    let mut verified = 0;
    for handle in handles {
        if handle.await.unwrap() == OtpOutcome::Verified {
            verified += 1;
        }
    }
    assert_eq!(verified, 1);
}

#[tokio::test]
async fn test_outcome_mapping() {
    assert_eq!(OtpOutcome::Verified.into_result(), Ok(()));
    assert_eq!(OtpOutcome::WrongCode.into_result(), Err(OtpError::OtpWrongCode));
    assert_eq!(OtpOutcome::Expired.into_result(), Err(OtpError::OtpExpired));
    assert_eq!(OtpOutcome::NoChallenge.into_result(), Err(OtpError::OtpNotFound));
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let otp = OtpChallenge::new(Arc::new(FailingOtpStore));
    assert!(matches!(otp.issue(1, at(0)).await, Err(OtpError::Storage { .. })));
    assert!(matches!(otp.verify(1, "123456", at(0)).await, Err(OtpError::Storage { .. })));
}

#[tokio::test]
async fn test_custom_ttl() {
    let store = Arc::new(MemoryOtpStore::new());
    let otp = OtpChallenge::with_ttl(store.clone(), chrono::Duration::seconds(30));
    assert_eq!(otp.ttl(), chrono::Duration::seconds(30));

    let code = otp.issue(1, at(0)).await.unwrap();
    assert_eq!(
        otp.verify(1, &code, at(31)).await.unwrap(),
        OtpOutcome::Expired
    );
}
