//! Bearer token issuing and verification (HS256 JWT).

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{AccessTokenClaims, User};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Signs and verifies bearer tokens
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    expiration: i64,
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            issuer: config.jwt_issuer.clone(),
            expiration: config.token_expiration,
            header: Header::default(),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Generate a bearer token for a user
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiration);

        let claims = AccessTokenClaims {
            sub: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign bearer token: {:?}", e);
            AuthError::Internal
        })
    }

    /// Validate a bearer token and return its claims
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}
