//! Main account service implementation

use std::sync::Arc;

use cv_shared::validation::{
    email_local_part, is_email_identifier, is_valid_email, is_valid_username, mask_email,
    mask_identifier, normalize_email,
};

use crate::domain::entities::account::{username_candidates, Account, AccountId, NewAccount};
use crate::domain::entities::credential::Credential;
use crate::domain::entities::token::{SessionClaims, PASSWORD_RESET_PURPOSE};
use crate::domain::value_objects::{AccountProfile, LoginResponse};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::credential::check_password_policy;
use crate::services::otp::{OtpChallenge, OtpStore};
use crate::services::rate_limit::{CHAT_OPERATION, OTP_RESEND_OPERATION};
use crate::services::security::SecurityCore;

use super::config::AccountServiceConfig;
use super::mailer::Mailer;

/// Account service for the signup, login and recovery flows
pub struct AccountService<R, M, S>
where
    R: AccountRepository,
    M: Mailer,
    S: OtpStore,
{
    /// Account storage
    accounts: Arc<R>,
    /// Outbound mail
    mailer: Arc<M>,
    /// Email verification codes
    otp: OtpChallenge<S>,
    /// Clock, vault, tokens and rate limiter
    security: SecurityCore,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<R, M, S> AccountService<R, M, S>
where
    R: AccountRepository,
    M: Mailer,
    S: OtpStore,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository for account persistence
    /// * `mailer` - Transactional mail sender
    /// * `otp_store` - Storage for pending OTP records
    /// * `security` - Shared security services
    /// * `config` - Service configuration
    pub fn new(
        accounts: Arc<R>,
        mailer: Arc<M>,
        otp_store: Arc<S>,
        security: SecurityCore,
        config: AccountServiceConfig,
    ) -> Self {
        let otp = OtpChallenge::with_ttl(otp_store, config.otp_ttl);
        Self {
            accounts,
            mailer,
            otp,
            security,
            config,
        }
    }

    /// Register a new, unverified account and send its verification code
    ///
    /// This method:
    /// 1. Validates the email and applies the password policy
    /// 2. Rejects an email that is already registered
    /// 3. Derives a unique username from the email local part
    /// 4. Stores the hashed credential and issues an OTP
    /// 5. Sends the welcome and OTP mails (failures are logged, not returned)
    ///
    /// # Returns
    ///
    /// * `Ok(AccountProfile)` - The created account
    /// * `Err(DomainError)` - Invalid email, weak password, duplicate email or storage failure
    pub async fn signup(&self, email: &str, password: &str) -> DomainResult<AccountProfile> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        check_password_policy(password)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let username = self.unique_username(email_local_part(&email)).await?;
        let credential = self.hash_password(password).await?;
        let now = self.security.clock.now();

        let account = self
            .accounts
            .create(NewAccount {
                username,
                email,
                credential,
                created_at: now,
            })
            .await?;
        let code = self.otp.issue(account.id, now).await?;

        tracing::info!(
            account_id = account.id,
            email = %mask_email(&account.email),
            event = "account_created",
            "Created unverified account"
        );

        if let Err(e) = self
            .mailer
            .send_welcome(&account.email, &account.username, &code)
            .await
        {
            tracing::warn!(
                account_id = account.id,
                error = %e,
                event = "welcome_mail_failed",
                "Failed to send welcome mail"
            );
        }
        if let Err(e) = self.mailer.send_otp(&account.email, &code).await {
            tracing::warn!(
                account_id = account.id,
                error = %e,
                event = "otp_mail_failed",
                "Failed to send OTP mail"
            );
        }

        Ok(AccountProfile::from(&account))
    }

    /// Log in with an email or username and a password
    ///
    /// An identifier containing `@` is looked up as an email, anything else
    /// as a username. Unknown accounts and wrong passwords both yield
    /// `InvalidCredentials`.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - Session token and profile
    /// * `Err(AuthError::InvalidCredentials)` - Unknown account or wrong password
    /// * `Err(AuthError::AccountNotVerified)` - Correct password, OTP not yet confirmed
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<LoginResponse> {
        let identifier = identifier.trim();
        let account = if is_email_identifier(identifier) {
            self.accounts
                .find_by_email(&normalize_email(identifier))
                .await?
        } else {
            self.accounts.find_by_username(identifier).await?
        };

        let Some(account) = account else {
            tracing::warn!(
                identifier = %mask_identifier(identifier),
                event = "login_unknown_account",
                "Login failed"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        };

        if !self
            .verify_password(password, account.credential.clone())
            .await?
        {
            tracing::warn!(
                account_id = account.id,
                event = "login_wrong_password",
                "Login failed"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !account.is_verified {
            return Err(DomainError::Auth(AuthError::AccountNotVerified));
        }

        let token = self.security.tokens.issue_session(
            account.id,
            &account.username,
            &account.email,
            self.security.clock.now(),
        )?;

        tracing::info!(account_id = account.id, event = "login_success", "Login succeeded");

        Ok(LoginResponse::bearer(
            token,
            self.security.tokens.session_ttl_seconds(),
            AccountProfile::from(&account),
        ))
    }

    /// Confirm the signup code and mark the account verified
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Account verified; the code cannot be replayed
    /// * `Err(AuthError::AccountNotFound)` - Unknown identifier
    /// * `Err(OtpError::OtpWrongCode | OtpExpired | OtpNotFound)` - Code rejected
    pub async fn verify_otp(&self, identifier: &str, code: &str) -> DomainResult<()> {
        let account = self.require_account(identifier).await?;
        let outcome = self
            .otp
            .verify(account.id, code.trim(), self.security.clock.now())
            .await?;
        outcome.into_result()?;

        self.accounts.mark_verified(account.id).await?;
        tracing::info!(account_id = account.id, event = "account_verified", "Account verified");
        Ok(())
    }

    /// Issue and send a new code, at most 5 times per hour per identifier
    ///
    /// The limit is counted before the account is looked up, so unknown
    /// identifiers consume it too. A denied request leaves the pending code
    /// untouched.
    pub async fn resend_otp(&self, identifier: &str) -> DomainResult<()> {
        let now = self.security.clock.now();
        self.security
            .limiter
            .check(
                self.config.otp_resend_limit,
                OTP_RESEND_OPERATION,
                &limit_identifier(identifier),
                now,
            )
            .await?;

        let account = self.require_account(identifier).await?;
        let code = self.otp.issue(account.id, now).await?;

        self.mailer
            .send_otp(&account.email, &code)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to send OTP mail: {}", e),
            })?;

        tracing::info!(account_id = account.id, event = "otp_resent", "OTP resent");
        Ok(())
    }

    /// Send a password-reset token if the email belongs to an account
    ///
    /// Always succeeds for unknown emails so callers cannot probe which
    /// addresses are registered.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!(
                email = %mask_email(&email),
                event = "password_reset_unknown_email",
                "Password reset requested for unknown email"
            );
            return Ok(());
        };

        let token = self
            .security
            .tokens
            .issue_password_reset(&account.email, self.security.clock.now())?;

        if let Err(e) = self
            .mailer
            .send_password_reset(&account.email, &token)
            .await
        {
            tracing::warn!(
                account_id = account.id,
                error = %e,
                event = "password_reset_mail_failed",
                "Failed to send password reset mail"
            );
        } else {
            tracing::info!(
                account_id = account.id,
                event = "password_reset_sent",
                "Password reset token sent"
            );
        }
        Ok(())
    }

    /// Replace the password of the account named by a reset token
    ///
    /// The token stays valid until it expires; it is not consumed here.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Credential replaced
    /// * `Err(TokenError)` - Token expired, malformed, forged or not a reset token
    /// * `Err(AuthError::WeakPassword)` - New password fails the policy
    /// * `Err(AuthError::AccountNotFound)` - The account no longer exists
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        let email = self.security.tokens.verify_capability(
            token,
            PASSWORD_RESET_PURPOSE,
            self.security.clock.now(),
        )?;
        check_password_policy(new_password)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))?;

        let credential = self.hash_password(new_password).await?;
        self.accounts.update_credential(account.id, credential).await?;

        tracing::info!(account_id = account.id, event = "password_reset", "Password reset");
        Ok(())
    }

    /// Change the password of a logged-in account
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Credential replaced
    /// * `Err(AuthError::WeakPassword)` - New password fails the policy
    /// * `Err(AuthError::AccountNotFound)` - Unknown account id
    /// * `Err(AuthError::InvalidCredentials)` - Old password does not match
    pub async fn change_password(
        &self,
        account_id: AccountId,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        check_password_policy(new_password)?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))?;

        if !self
            .verify_password(old_password, account.credential.clone())
            .await?
        {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        let credential = self.hash_password(new_password).await?;
        self.accounts.update_credential(account.id, credential).await?;

        tracing::info!(account_id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Whether an account is registered under the email
    ///
    /// Backs the signup form's availability check. Invalid addresses are
    /// simply not registered.
    pub async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Ok(false);
        }
        Ok(self.accounts.find_by_email(&email).await?.is_some())
    }

    /// Rename the session's own account
    ///
    /// # Returns
    ///
    /// * `Ok(AccountProfile)` - The renamed account
    /// * `Err(AuthError::NotAccountOwner)` - `account_id` is not the session's account
    /// * `Err(DomainError::Validation)` - Username malformed
    /// * `Err(AuthError::UsernameTaken)` - Another account holds the name
    /// * `Err(AuthError::AccountNotFound)` - The account no longer exists
    pub async fn change_username(
        &self,
        claims: &SessionClaims,
        account_id: AccountId,
        new_username: &str,
    ) -> DomainResult<AccountProfile> {
        if claims.account_id()? != account_id {
            tracing::warn!(
                account_id,
                session = %claims.sub,
                event = "username_change_forbidden",
                "Session does not own the account"
            );
            return Err(DomainError::Auth(AuthError::NotAccountOwner));
        }

        let new_username = new_username.trim();
        if !is_valid_username(new_username) {
            return Err(DomainError::Validation {
                message: "Username must be 3-32 letters, digits, '.', '_' or '-'".to_string(),
            });
        }

        let account = self
            .accounts
            .update_username(account_id, new_username)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => DomainError::Auth(AuthError::AccountNotFound),
                other => other,
            })?;

        tracing::info!(account_id, event = "username_changed", "Username changed");
        Ok(AccountProfile::from(&account))
    }

    /// Verify an `Authorization: Bearer <token>` header
    ///
    /// # Returns
    ///
    /// * `Ok(SessionClaims)` - Valid session
    /// * `Err(AuthError::MissingBearer)` - Header absent or not a bearer credential
    /// * `Err(TokenError)` - Token rejected
    pub fn authenticate(&self, authorization: Option<&str>) -> DomainResult<SessionClaims> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(DomainError::Auth(AuthError::MissingBearer))?;
        self.security
            .tokens
            .verify_session(token, self.security.clock.now())
    }

    /// Count one chat turn for the session's account
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Turn allowed
    /// * `Err(RateLimitError::RateLimited)` - More than 30 turns in the current minute
    pub async fn authorize_chat_turn(&self, claims: &SessionClaims) -> DomainResult<()> {
        self.security
            .limiter
            .check(
                self.config.chat_limit,
                CHAT_OPERATION,
                &claims.sub,
                self.security.clock.now(),
            )
            .await
    }

    /// Look up an identifier as an email first, then as a username
    async fn require_account(&self, identifier: &str) -> DomainResult<Account> {
        let identifier = identifier.trim();
        if let Some(account) = self
            .accounts
            .find_by_email(&normalize_email(identifier))
            .await?
        {
            return Ok(account);
        }
        self.accounts
            .find_by_username(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))
    }

    /// First free username among `base`, `base1`, `base2`, ...
    async fn unique_username(&self, base: &str) -> DomainResult<String> {
        for candidate in username_candidates(base) {
            if self.accounts.find_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal {
            message: "Username candidates exhausted".to_string(),
        })
    }

    async fn hash_password(&self, password: &str) -> DomainResult<Credential> {
        let vault = self.security.vault.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || vault.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    async fn verify_password(&self, password: &str, credential: Credential) -> DomainResult<bool> {
        let vault = self.security.vault.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || vault.verify(&password, &credential))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })
    }
}

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Rate-limit identity: trimmed, and case-folded when it is an email
fn limit_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();
    if is_email_identifier(identifier) {
        normalize_email(identifier)
    } else {
        identifier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_limit_identifier() {
        assert_eq!(limit_identifier(" Ana@X.com "), "ana@x.com");
        assert_eq!(limit_identifier("Ana1"), "Ana1");
    }
}
