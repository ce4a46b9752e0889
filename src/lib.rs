//! Task Manager Authentication
//!
//! Authentication for the Task Manager API:
//! - User registration and login
//! - JWT bearer tokens
//! - Argon2id password hashing
//! - Password reset by emailed, single-use, 30-minute token
//!
//! # Configuration
//!
//! Configuration is loaded from environment variables, see [`AuthConfig`]:
//! - `JWT_SECRET` - Secret key for signing JWTs (required, min 32 chars)
//! - `JWT_EXPIRATION` - Bearer token lifetime in seconds (default: 7200)
//! - `PASSWORD_RESET_EXPIRATION` - Reset token lifetime in seconds (default: 1800)
//! - `RESET_PASSWORD_URL` - Page the emailed link points to
//! - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `MAIL_FROM`
//!
//! # Usage
//!
//! ```rust,ignore
//! use taskmanager_auth::{create_app, AuthService, PgResetTokenStore, PgUserStore};
//!
//! let auth = Arc::new(AuthService::new(
//!     config,
//!     Arc::new(PgUserStore::new(pool.clone())),
//!     Arc::new(PgResetTokenStore::new(pool)),
//!     notifier,
//! ));
//! let app = create_app(auth, "http://localhost:4200")?;
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod service;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use config::{AuthConfig, ServerConfig, SmtpConfig};
pub use error::{AuthError, ErrorKind};
pub use extractors::{AuthJson, AuthUser};
pub use handlers::AuthState;
pub use mail::{EmailNotifier, LogNotifier, SmtpNotifier};
pub use models::*;
pub use service::AuthService;
pub use store::{
    MemoryResetTokenStore, MemoryUserStore, PgResetTokenStore, PgUserStore, ResetTokenStore,
    UserStore,
};
pub use token::TokenIssuer;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Create authentication routes
pub fn create_routes(auth_service: Arc<AuthService>) -> Router {
    handlers::create_routes(auth_service)
}

/// Authentication routes wrapped with a CORS policy for the frontend origin.
/// Only `POST` is allowed; every auth endpoint is a POST.
pub fn create_app(auth_service: Arc<AuthService>, cors_origin: &str) -> Result<Router, AuthError> {
    let origin: HeaderValue = cors_origin
        .parse()
        .map_err(|_| AuthError::Config(format!("Invalid CORS origin: {}", cors_origin)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Ok(create_routes(auth_service).layer(ServiceBuilder::new().layer(cors)))
}
