//! Authentication HTTP Handlers
//!
//! REST API endpoints for authentication operations.

use crate::error::AuthError;
use crate::extractors::AuthJson;
use crate::models::*;
use crate::service::AuthService;

use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use std::sync::Arc;
use validator::Validate;

/// Shared auth service state
pub type AuthState = Arc<AuthService>;

// ============================================
// Route Builder
// ============================================

/// Create authentication routes
pub fn create_routes(auth_service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .with_state(auth_service)
}

fn validate(req: &impl Validate) -> Result<(), AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))
}

// ============================================
// Login / Registration
// ============================================

/// POST /auth/login
pub async fn login(
    State(auth): State<AuthState>,
    AuthJson(req): AuthJson<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validate(&req)?;

    let response = auth.login(req).await?;

    Ok(Json(response))
}

/// POST /auth/register
///
/// Registration logs the new user in straight away.
pub async fn register(
    State(auth): State<AuthState>,
    AuthJson(req): AuthJson<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    // Mismatch is reported before field-level validation
    if req.password != req.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    validate(&req)?;

    let response = auth.register(req).await?;

    Ok(Json(response))
}

// ============================================
// Password Management
// ============================================

/// POST /auth/forgot-password
///
/// The token itself only travels by email.
pub async fn forgot_password(
    State(auth): State<AuthState>,
    AuthJson(req): AuthJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validate(&req)?;

    auth.forgot_password(&req.email).await
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(auth): State<AuthState>,
    AuthJson(req): AuthJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AuthError> {
    if req.new_password != req.confirm_new_password {
        return Err(AuthError::PasswordMismatch);
    }
    validate(&req)?;

    auth.reset_password(req).await
}
