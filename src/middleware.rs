//! Authentication Middleware
//!
//! Bearer token validation for routes mounted behind the auth module.
//!
//! ```rust,ignore
//! let tasks = Router::new()
//!     .route("/tasks", get(list_tasks))
//!     .layer(axum::middleware::from_fn_with_state(auth.clone(), require_auth));
//! ```

use crate::handlers::AuthState;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

pub(crate) fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

/// Require a valid bearer token
///
/// Validates the token from the Authorization header and stores the claims
/// in request extensions for use by extractors.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| unauthorized("unauthorized", "Authentication required"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("unauthorized", "Invalid authorization header format"))?;

    let claims = auth
        .tokens()
        .verify(token)
        .map_err(|_| unauthorized("invalid_token", "Invalid or expired token"))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
