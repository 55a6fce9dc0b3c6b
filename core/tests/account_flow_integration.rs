//! End-to-end account flows through the public crate surface

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use cv_core::services::{ManualClock, MemoryOtpStore, TokenServiceConfig};
use cv_core::{
    AccountService, AccountServiceConfig, AuthError, ClockSource, CredentialVault, DomainError,
    InMemoryAccountRepository, Mailer, OtpError, RateLimiter, SecurityCore, TokenService,
};

const SECRET: &str = "integration-secret-that-is-long-enough-1234";

/// Keeps only the last code and token per address
#[derive(Default)]
struct Inbox {
    codes: Mutex<Vec<(String, String)>>,
    tokens: Mutex<Vec<(String, String)>>,
}

impl Inbox {
    fn code_for(&self, email: &str) -> String {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
            .expect("no code mailed")
    }

    fn token_for(&self, email: &str) -> String {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
            .expect("no reset token mailed")
    }
}

#[async_trait]
impl Mailer for Inbox {
    async fn send_welcome(&self, _email: &str, _username: &str, _code: &str) -> Result<(), String> {
        Ok(())
    }

    async fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        self.codes
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        self.tokens
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

type Service = AccountService<InMemoryAccountRepository, Inbox, MemoryOtpStore>;

fn setup() -> (Service, Arc<Inbox>, Arc<ManualClock>) {
    let inbox = Arc::new(Inbox::default());
    let clock = Arc::new(ManualClock::at_timestamp(1_700_000_000));
    let security = SecurityCore::new(
        clock.clone() as Arc<dyn ClockSource>,
        CredentialVault::new(4).unwrap(),
        TokenService::new(TokenServiceConfig::new(SECRET)).unwrap(),
        RateLimiter::in_process(),
    );
    let service = AccountService::new(
        Arc::new(InMemoryAccountRepository::new()),
        inbox.clone(),
        Arc::new(MemoryOtpStore::new()),
        security,
        AccountServiceConfig::default(),
    );
    (service, inbox, clock)
}

#[tokio::test]
async fn test_signup_verify_login_chat() {
    let (service, inbox, _clock) = setup();

    let profile = service.signup("Ana@X.com", "Password123").await.unwrap();
    assert_eq!(profile.username, "ana");

    service
        .verify_otp("ana@x.com", &inbox.code_for("ana@x.com"))
        .await
        .unwrap();

    let login = service.login("ana", "Password123").await.unwrap();
    let header = format!("Bearer {}", login.access_token);
    let claims = service.authenticate(Some(&header)).unwrap();
    assert_eq!(claims.account_id().unwrap(), profile.id);

    service.authorize_chat_turn(&claims).await.unwrap();
}

#[tokio::test]
async fn test_recovery_after_expired_code_and_forgotten_password() {
    let (service, inbox, clock) = setup();
    service.signup("bo@x.com", "Password123").await.unwrap();
    let stale = inbox.code_for("bo@x.com");

    clock.advance(Duration::minutes(11));
    assert!(matches!(
        service.verify_otp("bo@x.com", &stale).await,
        Err(DomainError::Otp(OtpError::OtpExpired))
    ));

    service.resend_otp("bo@x.com").await.unwrap();
    service
        .verify_otp("bo", &inbox.code_for("bo@x.com"))
        .await
        .unwrap();

    service.forgot_password("bo@x.com").await.unwrap();
    service
        .reset_password(&inbox.token_for("bo@x.com"), "Another456")
        .await
        .unwrap();

    assert!(matches!(
        service.login("bo@x.com", "Password123").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    let login = service.login("bo@x.com", "Another456").await.unwrap();

    service
        .change_password(login.account.id, "Another456", "Third789x")
        .await
        .unwrap();
    service.login("bo", "Third789x").await.unwrap();
}
