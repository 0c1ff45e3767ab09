//! Registration and login through the full router.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{post_json, test_app, TEST_SECRET};
use marikaya_api::TokenIssuer;
use serde_json::json;

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "email": "budi@example.com", "password": "rahasia", "full_name": "Budi" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "budi@example.com");
    assert_eq!(body["full_name"], "Budi");
    assert_eq!(body["is_active"], true);
    assert!(body["id"].as_i64().is_some());
    assert!(body["created_at"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn full_name_is_optional() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "email": "anon@example.com", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["full_name"].is_null());
}

#[tokio::test]
async fn duplicate_email_is_400() {
    let app = test_app();
    let creds = json!({ "email": "dup@example.com", "password": "x" });
    let (first, _) = post_json(&app, "/api/register", creds.clone()).await;
    assert_eq!(first, StatusCode::OK);

    let (status, body) = post_json(&app, "/api/register", creds).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Email already registered" }));
}

#[tokio::test]
async fn invalid_email_is_422() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "email": "not-an-email", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "email"]));
}

#[tokio::test]
async fn login_issues_bearer_token_for_user() {
    let app = test_app();
    let creds = json!({ "email": "sari@example.com", "password": "kunci" });
    let (_, user) = post_json(&app, "/api/register", creds.clone()).await;

    let (status, body) = post_json(&app, "/api/login", creds).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = TokenIssuer::new(TEST_SECRET, Duration::minutes(30))
        .decode(token)
        .unwrap();
    assert_eq!(claims.sub, user["id"].as_i64().unwrap().to_string());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_401() {
    let app = test_app();
    post_json(
        &app,
        "/api/register",
        json!({ "email": "joko@example.com", "password": "benar" }),
    )
    .await;

    for creds in [
        json!({ "email": "joko@example.com", "password": "salah" }),
        json!({ "email": "nobody@example.com", "password": "benar" }),
    ] {
        let (status, body) = post_json(&app, "/api/login", creds).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "detail": "Incorrect email or password" }));
    }
}

#[tokio::test]
async fn email_syntax_follows_address_rules() {
    let app = test_app();
    for bad in ["<>@example.com", "a(b)@example.com", "\"@example.com", "a@@b.com"] {
        let (status, body) = post_json(
            &app,
            "/api/register",
            json!({ "email": bad, "password": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{bad} should be rejected");
        assert_eq!(body["detail"][0]["type"], "value_error.email");
    }

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "email": "user@bücher.de", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "user@bücher.de");
}
