#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::{Arc, Mutex};
use taskmanager_auth::{
    create_routes, AuthConfig, AuthError, AuthService, EmailNotifier, MemoryResetTokenStore,
    MemoryUserStore,
};
use tower::ServiceExt;

/// Notifier that keeps every message for inspection
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl RecordingNotifier {
    /// Token embedded in the most recent reset link
    pub fn last_token(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last()?.body;
        let start = body.find("token=")? + "token=".len();
        body[start..].lines().next().map(str::to_string)
    }
}

#[async_trait]
impl EmailNotifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub auth: Arc<AuthService>,
    pub users: Arc<MemoryUserStore>,
    pub reset_tokens: Arc<MemoryResetTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret-0123456789".to_string(),
        jwt_issuer: "taskmanager-api".to_string(),
        token_expiration: 7200,
        argon2_memory_cost: 4096,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
        password_reset_expiration: 1800,
        reset_password_url: "http://localhost:4200/reset-password".to_string(),
        mail_from: "Task Manager <no-reply@example.com>".to_string(),
        smtp: None,
    }
}

pub fn spawn_app() -> TestApp {
    let users = Arc::new(MemoryUserStore::new());
    let reset_tokens = Arc::new(MemoryResetTokenStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let auth = Arc::new(AuthService::new(
        test_config(),
        users.clone(),
        reset_tokens.clone(),
        notifier.clone(),
    ));

    TestApp {
        router: create_routes(auth.clone()),
        auth,
        users,
        reset_tokens,
        notifier,
    }
}

impl TestApp {
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        send(self.router.clone(), request).await
    }

    pub async fn register(&self, email: &str, password: &str) -> (StatusCode, String) {
        self.post_json(
            "/auth/register",
            serde_json::json!({
                "email": email,
                "name": "Ana",
                "password": password,
                "confirmPassword": password
            }),
        )
        .await
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
