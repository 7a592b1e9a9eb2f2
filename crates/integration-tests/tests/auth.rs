//! Integration tests for registration and login.
//!
//! These tests require:
//! - A running MongoDB instance
//! - The API server running (cargo run -p seedleaf-server)
//!
//! Run with: cargo test -p seedleaf-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use seedleaf_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn register_login_and_me_round_trip() {
    let ctx = TestContext::new();
    let email = format!("it-{}@example.com", Uuid::new_v4());

    let resp = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&json!({
            "email": email,
            "name": "Asha",
            "password": "integration-password",
        }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("not JSON");
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("password_hash").is_none());

    let resp = ctx
        .client
        .post(format!("{}/api/auth/login", ctx.base_url))
        .json(&json!({ "email": email, "password": "integration-password" }))
        .send()
        .await
        .expect("login failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("not JSON");
    let token = body["token"].as_str().expect("no token");

    let resp = ctx
        .client
        .get(format!("{}/api/auth/me", ctx.base_url))
        .bearer_auth(token)
        .send()
        .await
        .expect("me failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = resp.json().await.expect("not JSON");
    assert_eq!(profile["email"], email.to_lowercase());
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn duplicate_registration_conflicts() {
    let ctx = TestContext::new();
    let email = format!("it-{}@example.com", Uuid::new_v4());
    let payload = json!({
        "email": email,
        "name": "Asha",
        "password": "integration-password",
    });

    let first = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&payload)
        .send()
        .await
        .expect("register failed");
    assert_eq!(first.status(), StatusCode::OK);

    let second = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&payload)
        .send()
        .await
        .expect("register failed");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn wrong_password_unauthorized() {
    let ctx = TestContext::new();
    let token = ctx.register_customer().await;
    assert!(!token.is_empty());

    let resp = ctx
        .client
        .post(format!("{}/api/auth/login", ctx.base_url))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong-password" }))
        .send()
        .await
        .expect("login failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("not JSON");
    assert!(body["detail"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn me_without_token_unauthorized() {
    let ctx = TestContext::new();
    let resp = ctx
        .client
        .get(format!("{}/api/auth/me", ctx.base_url))
        .send()
        .await
        .expect("me failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
