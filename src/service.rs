//! Authentication Service
//!
//! Core authentication logic: password hashing, account creation,
//! credential checks and the password reset flow. Persistence, mail
//! delivery and token signing are injected through the constructor.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::mail::{reset_email_body, EmailNotifier, RESET_EMAIL_SUBJECT};
use crate::models::*;
use crate::store::{ResetTokenStore, UserStore};
use crate::token::TokenIssuer;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;

/// Authentication service
pub struct AuthService {
    config: AuthConfig,
    users: Arc<dyn UserStore>,
    reset_tokens: Arc<dyn ResetTokenStore>,
    notifier: Arc<dyn EmailNotifier>,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        config: AuthConfig,
        users: Arc<dyn UserStore>,
        reset_tokens: Arc<dyn ResetTokenStore>,
        notifier: Arc<dyn EmailNotifier>,
    ) -> Self {
        let tokens = TokenIssuer::new(&config);

        Self {
            config,
            users,
            reset_tokens,
            notifier,
            tokens,
        }
    }

    /// Get reference to config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Get reference to the token issuer
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    // ============================================
    // Password Hashing
    // ============================================

    fn argon2(&self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(
            self.config.argon2_memory_cost,
            self.config.argon2_time_cost,
            self.config.argon2_parallelism,
            None,
        )
        .map_err(|e| {
            tracing::error!("Invalid Argon2 parameters: {}", e);
            AuthError::Internal
        })?;

        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }

    /// Hash a password using Argon2id
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)?
            .to_string();

        Ok(hash)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::Internal)?;

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    // ============================================
    // Login / Registration
    // ============================================

    /// Check credentials and issue a bearer token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verify_password(&req.password, &user.password_hash)? {
            tracing::warn!(email = %user.email, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;

        Ok(LoginResponse {
            name: user.name,
            token,
        })
    }

    /// Create an account and log it in
    pub async fn register(&self, req: RegisterRequest) -> Result<LoginResponse, AuthError> {
        if req.password != req.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::EmailExists);
        }

        let password_hash = self.hash_password(&req.password)?;
        let user = User::new(req.email, req.name, password_hash);

        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        let token = self.tokens.issue(&user)?;

        Ok(LoginResponse {
            name: user.name,
            token,
        })
    }

    // ============================================
    // Password Reset
    // ============================================

    /// Issue a reset token and mail the reset link to the account owner
    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let token = generate_reset_token();

        // At most one live token per email
        let superseded = self.reset_tokens.delete_by_email(email).await?;
        if superseded > 0 {
            tracing::debug!(email = %email, superseded, "Replaced pending reset tokens");
        }

        let expires_at = Utc::now() + Duration::seconds(self.config.password_reset_expiration);
        self.reset_tokens
            .insert(&PasswordResetToken::new(token.clone(), email, expires_at))
            .await?;

        let reset_link = format!("{}?token={}", self.config.reset_password_url, token);
        let body = reset_email_body(
            &user.name,
            &reset_link,
            self.config.reset_expiration_minutes(),
        );

        self.notifier
            .send(email, RESET_EMAIL_SUBJECT, &body)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset requested");

        Ok(format!("Password reset e-mail sent to: {}", email))
    }

    /// Complete password reset with a previously mailed token
    pub async fn reset_password(&self, req: ResetPasswordRequest) -> Result<String, AuthError> {
        if req.new_password != req.confirm_new_password {
            return Err(AuthError::PasswordMismatch);
        }

        let reset_token = self
            .reset_tokens
            .find_by_token(&req.token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // Expired tokens stay in place until superseded
        if reset_token.is_expired() {
            return Err(AuthError::ExpiredToken);
        }

        let user = self
            .users
            .find_by_email(&reset_token.email)
            .await?
            .ok_or(AuthError::TokenOwnerNotFound)?;

        let password_hash = self.hash_password(&req.new_password)?;
        self.users
            .update_password(&user.email, &password_hash)
            .await
            .map_err(|e| match e {
                AuthError::UserNotFound => AuthError::TokenOwnerNotFound,
                other => other,
            })?;

        self.reset_tokens.delete(reset_token.id).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");

        Ok("Password reset complete!".to_string())
    }
}

/// Opaque reset token: 32 random bytes, hex encoded
fn generate_reset_token() -> String {
    use std::fmt::Write;

    let token_bytes: [u8; 32] = rand::thread_rng().gen();
    token_bytes
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}
