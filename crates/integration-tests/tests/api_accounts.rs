//! Integration tests for signup, login, and profile endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use reclaim_integration_tests::{TestContext, get, post_json};
use serde_json::json;

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let (status, _) = get(&ctx.app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&ctx.app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_returns_sanitized_profile() {
    let ctx = TestContext::new().await;

    let (status, body) = post_json(
        &ctx.app,
        "/api/signup",
        json!({
            "name": "Ann",
            "email": "ann@example.com",
            "mobile": "555-0101",
            "password": "hunter22",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Signup successful");

    let user = &body["user"];
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["lostCount"], 0);
    assert_eq!(user["foundCount"], 0);
    assert_eq!(user["returnedCount"], 0);
    assert!(user["id"].as_i64().is_some());

    // No credential material may appear anywhere in the response.
    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("hash"));
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict() {
    let ctx = TestContext::new().await;
    ctx.signup("Ann", "ann@example.com", "hunter22").await;

    let (status, body) = post_json(
        &ctx.app,
        "/api/signup",
        json!({
            "name": "Other Ann",
            "email": "ann@example.com",
            "mobile": "555-0102",
            "password": "different",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_signup_missing_fields_rejected() {
    let ctx = TestContext::new().await;

    // Missing password.
    let (status, _) = post_json(
        &ctx.app,
        "/api/signup",
        json!({
            "name": "Ann",
            "email": "ann@example.com",
            "mobile": "555-0101",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed email.
    let (status, _) = post_json(
        &ctx.app,
        "/api/signup",
        json!({
            "name": "Ann",
            "email": "not-an-email",
            "mobile": "555-0101",
            "password": "hunter22",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was persisted.
    let (status, _) = post_json(
        &ctx.app,
        "/api/login",
        json!({"email": "ann@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_success() {
    let ctx = TestContext::new().await;
    let user = ctx.signup("Ann", "ann@example.com", "hunter22").await;

    let (status, body) = post_json(
        &ctx.app,
        "/api/login",
        json!({"email": "ann@example.com", "password": "hunter22"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], user["id"]);
    assert_eq!(body["user"]["email"], "ann@example.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new().await;
    ctx.signup("Ann", "ann@example.com", "hunter22").await;

    let (wrong_pw_status, wrong_pw_body) = post_json(
        &ctx.app,
        "/api/login",
        json!({"email": "ann@example.com", "password": "wrong"}),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &ctx.app,
        "/api/login",
        json!({"email": "nobody@example.com", "password": "hunter22"}),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Identical bodies so callers cannot probe which emails are registered.
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn test_profile_roundtrip_and_unknown_user() {
    let ctx = TestContext::new().await;
    let user = ctx.signup("Ann", "ann@example.com", "hunter22").await;
    let id = user["id"].as_i64().unwrap();

    let profile = ctx.profile(id).await;
    assert_eq!(profile["name"], "Ann");
    assert_eq!(profile["mobile"], "555-0100");

    let (status, _) = get(&ctx.app, &format!("/api/user/{}", id + 9000)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
