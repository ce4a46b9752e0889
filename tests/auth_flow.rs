mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::spawn_app;
use serde_json::json;
use taskmanager_auth::{LoginResponse, PasswordResetToken, ResetTokenStore};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn register_returns_name_and_token() {
    let app = spawn_app();

    let (status, body) = app.register("ana@example.com", "s3cret").await;

    assert_eq!(status, StatusCode::OK);
    let response: LoginResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.name, "Ana");
    let claims = assert_ok!(app.auth.tokens().verify(&response.token));
    assert_eq!(claims.sub, "ana@example.com");
}

#[tokio::test]
async fn register_with_mismatched_passwords_is_rejected() {
    let app = spawn_app();

    let (status, body) = app
        .post_json(
            "/auth/register",
            json!({
                "email": "ana@example.com",
                "name": "Ana",
                "password": "one",
                "confirmPassword": "two"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Passwords do not match");
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = spawn_app();
    app.register("ana@example.com", "s3cret").await;

    let (status, body) = app.register("ana@example.com", "other").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Email already registered");
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn login_with_valid_and_invalid_credentials() {
    let app = spawn_app();
    app.register("ana@example.com", "s3cret").await;

    let (status, body) = app
        .post_json(
            "/auth/login",
            json!({ "email": "ana@example.com", "password": "s3cret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let response: LoginResponse = serde_json::from_str(&body).unwrap();
    assert_ok!(app.auth.tokens().verify(&response.token));

    let (status, body) = app
        .post_json(
            "/auth/login",
            json!({ "email": "ana@example.com", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
}

#[tokio::test]
async fn login_with_unknown_email() {
    let app = spawn_app();

    let (status, body) = app
        .post_json(
            "/auth/login",
            json!({ "email": "ghost@example.com", "password": "x" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "User not found");
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let app = spawn_app();

    let (status, body) = app
        .post_json("/auth/login", json!({ "email": "ana@example.com" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing field `password`"));
}

#[tokio::test]
async fn non_json_body_is_a_bad_request() {
    let app = spawn_app();

    let (status, _) = app
        .post_json("/auth/reset-password", json!(["not", "an", "object"]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_a_validation_error() {
    let app = spawn_app();

    let (status, body) = app
        .post_json("/auth/forgot-password", json!({ "email": "not-an-email" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid email format"));
}

#[tokio::test]
async fn forgot_password_for_unknown_email() {
    let app = spawn_app();

    let (status, body) = app
        .post_json("/auth/forgot-password", json!({ "email": "ghost@example.com" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "E-mail not found.");
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn forgot_password_sends_link_by_email_only() {
    let app = spawn_app();
    app.register("ana@example.com", "s3cret").await;

    let (status, body) = app
        .post_json("/auth/forgot-password", json!({ "email": "ana@example.com" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Password reset e-mail sent to: ana@example.com");

    let token = app.notifier.last_token().unwrap();
    assert!(!body.contains(&token));

    let sent = app.notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@example.com");
    assert!(sent[0].body.contains("Hello, Ana!"));
    assert!(sent[0]
        .body
        .contains(&format!("http://localhost:4200/reset-password?token={}", token)));
}

#[tokio::test]
async fn repeated_forgot_password_leaves_one_live_token() {
    let app = spawn_app();
    app.register("ana@example.com", "s3cret").await;

    for _ in 0..2 {
        let (status, _) = app
            .post_json("/auth/forgot-password", json!({ "email": "ana@example.com" }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let live = app.reset_tokens.tokens_for("ana@example.com").await;
    assert_eq!(live.len(), 1);
    assert_eq!(Some(live[0].token.clone()), app.notifier.last_token());
}

#[tokio::test]
async fn full_reset_flow_and_replay() {
    let app = spawn_app();
    app.register("ana@example.com", "old-password").await;
    app.post_json("/auth/forgot-password", json!({ "email": "ana@example.com" }))
        .await;
    let token = app.notifier.last_token().unwrap();

    let reset = json!({
        "token": token,
        "newPassword": "new-password",
        "confirmNewPassword": "new-password"
    });

    let (status, body) = app.post_json("/auth/reset-password", reset.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Password reset complete!");
    assert!(app.reset_tokens.tokens_for("ana@example.com").await.is_empty());

    let (status, body) = app.post_json("/auth/reset-password", reset).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid token.");

    let (status, _) = app
        .post_json(
            "/auth/login",
            json!({ "email": "ana@example.com", "password": "new-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post_json(
            "/auth/login",
            json!({ "email": "ana@example.com", "password": "old-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_with_mismatched_passwords() {
    let app = spawn_app();

    let (status, body) = app
        .post_json(
            "/auth/reset-password",
            json!({
                "token": "whatever",
                "newPassword": "one",
                "confirmNewPassword": "two"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Passwords do not match");
}

#[tokio::test]
async fn expired_token_is_rejected_and_not_consumed() {
    let app = spawn_app();
    app.register("ana@example.com", "s3cret").await;
    let stale = PasswordResetToken::new(
        "stale-token".to_string(),
        "ana@example.com",
        Utc::now() - Duration::minutes(31),
    );
    assert_ok!(app.reset_tokens.insert(&stale).await);

    let reset = json!({
        "token": "stale-token",
        "newPassword": "new-password",
        "confirmNewPassword": "new-password"
    });

    for _ in 0..2 {
        let (status, body) = app.post_json("/auth/reset-password", reset.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Expired token.");
    }

    assert_eq!(app.reset_tokens.tokens_for("ana@example.com").await.len(), 1);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = spawn_app();

    let result = app
        .auth
        .reset_password(taskmanager_auth::ResetPasswordRequest {
            token: "nope".to_string(),
            new_password: "pw".to_string(),
            confirm_new_password: "pw".to_string(),
        })
        .await;

    assert_err!(result);
}
