//! Outbound email
//!
//! Plain-text notifications sent through an SMTP relay with `lettre`,
//! or written to the log when no relay is configured.

use crate::config::{AuthConfig, SmtpConfig};
use crate::error::AuthError;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

/// Sends a plaintext message to an address
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError>;
}

/// SMTP notifier using a STARTTLS relay
pub struct SmtpNotifier {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(smtp: &SmtpConfig, from: &str) -> Result<Self, AuthError> {
        let from: Mailbox = from.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
            .port(smtp.port)
            .timeout(Some(std::time::Duration::from_secs(10)));

        if !smtp.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ));
        }

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl EmailNotifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(email).await?;

        tracing::info!(to = %to, "Email sent");
        Ok(())
    }
}

/// Notifier that only logs outgoing mail, for local runs without SMTP
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl EmailNotifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        tracing::info!(to = %to, subject = %subject, "SMTP not configured, email not delivered");
        tracing::debug!(body = %body, "Undelivered email body");
        Ok(())
    }
}

/// Pick the SMTP notifier when a relay is configured, otherwise log only
pub fn notifier_from_config(
    config: &AuthConfig,
) -> Result<Arc<dyn EmailNotifier>, AuthError> {
    match &config.smtp {
        Some(smtp) => Ok(Arc::new(SmtpNotifier::new(smtp, &config.mail_from)?)),
        None => {
            tracing::warn!("SMTP_HOST not set, reset emails will only be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}

/// Body of the password reset email
pub fn reset_email_body(name: &str, reset_link: &str, expires_in_minutes: i64) -> String {
    format!(
        "Hello, {name}!\n\n\
         Click the link below to reset your password:\n\
         {reset_link}\n\n\
         The link expires in {expires_in_minutes} minutes.\n\n\
         Task Manager"
    )
}

pub const RESET_EMAIL_SUBJECT: &str = "Password reset - Task Manager";
