//! Authentication Extractors

use crate::error::AuthError;
use crate::middleware::unauthorized;
use crate::models::AccessTokenClaims;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    response::Response,
    Json,
};

/// JSON body whose rejections are reported as `400` [`AuthError`]s
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);

/// Authenticated user taken from claims stored by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub name: String,
}

impl AuthUser {
    pub fn from_claims(claims: &AccessTokenClaims) -> Self {
        Self {
            email: claims.sub.clone(),
            name: claims.name.clone(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessTokenClaims>()
            .map(AuthUser::from_claims)
            .ok_or_else(|| unauthorized("unauthorized", "Authentication required"))
    }
}
