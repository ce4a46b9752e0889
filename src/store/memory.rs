//! In-memory stores backed by `tokio::sync::RwLock`.

use super::{ResetTokenStore, UserStore};
use crate::error::AuthError;
use crate::models::{PasswordResetToken, User};

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AuthError::EmailExists);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(email).ok_or(AuthError::UserNotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryResetTokenStore {
    tokens: RwLock<HashMap<String, PasswordResetToken>>,
}

impl MemoryResetTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tokens currently held for `email`
    pub async fn tokens_for(&self, email: &str) -> Vec<PasswordResetToken> {
        self.tokens
            .read()
            .await
            .values()
            .filter(|t| t.email == email)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ResetTokenStore for MemoryResetTokenStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AuthError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn insert(&self, token: &PasswordResetToken) -> Result<(), AuthError> {
        self.tokens
            .write()
            .await
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
        self.tokens.write().await.retain(|_, t| t.id != id);
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, AuthError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.email != email);
        Ok((before - tokens.len()) as u64)
    }
}
