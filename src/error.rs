//! Authentication Error Types
//!
//! Centralized error handling for all authentication operations.
//! Every caller-facing failure is reported as `400 Bad Request` with a
//! plain-text message; infrastructure failures become `500`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Coarse classification of an [`AuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown email or token
    NotFound,
    /// Request failed validation (mismatched passwords, malformed fields)
    Validation,
    /// Duplicate registration
    Conflict,
    /// Stale reset token
    Expired,
    /// Credential mismatch, deliberately reported without detail
    Rejected,
    /// Store, mail transport, hashing or configuration failure
    Internal,
}

/// Authentication errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User not found.")]
    TokenOwnerNotFound,

    #[error("E-mail not found.")]
    EmailNotFound,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailExists,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Expired token.")]
    ExpiredToken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail delivery error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound
            | AuthError::TokenOwnerNotFound
            | AuthError::EmailNotFound
            | AuthError::InvalidToken => ErrorKind::NotFound,
            AuthError::PasswordMismatch | AuthError::Validation(_) => ErrorKind::Validation,
            AuthError::EmailExists => ErrorKind::Conflict,
            AuthError::ExpiredToken => ErrorKind::Expired,
            AuthError::InvalidCredentials => ErrorKind::Rejected,
            AuthError::Database(_)
            | AuthError::Mail(_)
            | AuthError::Config(_)
            | AuthError::Internal => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self.kind() {
            // Login mismatch answers with an empty body
            ErrorKind::Rejected => StatusCode::BAD_REQUEST.into_response(),
            ErrorKind::Internal => {
                tracing::error!(error = %self, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
                    .into_response()
            }
            _ => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AuthError::Validation(rejection.body_text())
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AuthError::Database(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AuthError::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("JWT error: {:?}", err);
        AuthError::InvalidToken
    }
}

impl From<lettre::error::Error> for AuthError {
    fn from(err: lettre::error::Error) -> Self {
        tracing::error!("Failed to build email: {:?}", err);
        AuthError::Mail(err.to_string())
    }
}

impl From<lettre::address::AddressError> for AuthError {
    fn from(err: lettre::address::AddressError) -> Self {
        tracing::error!("Invalid email address: {:?}", err);
        AuthError::Mail(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for AuthError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        tracing::error!("SMTP error: {:?}", err);
        AuthError::Mail(err.to_string())
    }
}
