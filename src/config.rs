//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables.
//! No hardcoded secrets or sensitive data.

use crate::error::AuthError;
use std::env;
use std::str::FromStr;

/// Longest accepted reset token lifetime (1 day)
pub const MAX_PASSWORD_RESET_EXPIRATION: i64 = 86_400;

/// Longest accepted bearer token lifetime (30 days)
pub const MAX_TOKEN_EXPIRATION: i64 = 30 * 86_400;

/// SMTP relay settings (from SMTP_* env vars)
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT secret key for signing tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// JWT issuer (from JWT_ISSUER env var)
    pub jwt_issuer: String,

    /// Bearer token lifetime in seconds (from JWT_EXPIRATION env var)
    pub token_expiration: i64,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,

    /// Password reset token lifetime in seconds (from PASSWORD_RESET_EXPIRATION env var)
    pub password_reset_expiration: i64,

    /// Frontend page that receives the reset token (from RESET_PASSWORD_URL env var)
    pub reset_password_url: String,

    /// Sender address for outbound mail (from MAIL_FROM env var)
    pub mail_from: String,

    /// SMTP relay; `None` when SMTP_HOST is unset
    pub smtp: Option<SmtpConfig>,
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            AuthError::Config("JWT_SECRET environment variable must be set".to_string())
        })?;

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) if !host.is_empty() => Some(SmtpConfig {
                host,
                port: parse_or("SMTP_PORT", 587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            }),
            _ => None,
        };

        Ok(Self {
            jwt_secret,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "taskmanager-api".to_string()),
            token_expiration: parse_or("JWT_EXPIRATION", 7200), // 2 hours
            argon2_memory_cost: parse_or("ARGON2_MEMORY_COST", 19456), // 19 MiB
            argon2_time_cost: parse_or("ARGON2_TIME_COST", 2),
            argon2_parallelism: parse_or("ARGON2_PARALLELISM", 1),
            password_reset_expiration: parse_or("PASSWORD_RESET_EXPIRATION", 1800), // 30 minutes
            reset_password_url: env::var("RESET_PASSWORD_URL")
                .unwrap_or_else(|_| "http://localhost:4200/reset-password".to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Task Manager <no-reply@taskmanager.local>".to_string()),
            smtp,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.token_expiration <= 0 || self.token_expiration > MAX_TOKEN_EXPIRATION {
            return Err(AuthError::Config(format!(
                "JWT_EXPIRATION must be between 1 and {} seconds",
                MAX_TOKEN_EXPIRATION
            )));
        }

        if self.password_reset_expiration <= 0
            || self.password_reset_expiration > MAX_PASSWORD_RESET_EXPIRATION
        {
            return Err(AuthError::Config(format!(
                "PASSWORD_RESET_EXPIRATION must be between 1 and {} seconds",
                MAX_PASSWORD_RESET_EXPIRATION
            )));
        }

        argon2::Params::new(
            self.argon2_memory_cost,
            self.argon2_time_cost,
            self.argon2_parallelism,
            None,
        )
        .map_err(|e| AuthError::Config(format!("Invalid Argon2 parameters: {}", e)))?;

        if self.reset_password_url.is_empty() {
            return Err(AuthError::Config(
                "RESET_PASSWORD_URL must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Reset token lifetime in minutes, rounded up, as quoted in the reset email
    pub fn reset_expiration_minutes(&self) -> i64 {
        (self.password_reset_expiration + 59) / 60
    }
}

/// HTTP server settings for the binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string; in-memory stores are used when unset
    pub database_url: Option<String>,
    pub bind_addr: String,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
        }
    }
}
