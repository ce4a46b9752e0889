//! Persistence interfaces for accounts and password reset tokens.
//!
//! The service only talks to these traits; `postgres` holds the sqlx
//! implementations and `memory` an in-process one for tests and local runs.

pub mod memory;
pub mod postgres;

pub use memory::{MemoryResetTokenStore, MemoryUserStore};
pub use postgres::{run_migrations, PgResetTokenStore, PgUserStore};

use crate::error::AuthError;
use crate::models::{PasswordResetToken, User};

use async_trait::async_trait;

/// Accounts keyed by email
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Insert a new account. Fails with `EmailExists` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), AuthError>;

    /// Replace the stored password hash. Fails with `UserNotFound` if the
    /// account vanished.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AuthError>;
}

/// Reset tokens keyed by token string and by owner email
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AuthError>;

    async fn insert(&self, token: &PasswordResetToken) -> Result<(), AuthError>;

    async fn delete(&self, id: uuid::Uuid) -> Result<(), AuthError>;

    /// Remove every token owned by `email`, returning how many were removed
    async fn delete_by_email(&self, email: &str) -> Result<u64, AuthError>;
}
