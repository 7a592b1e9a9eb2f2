//! Integration tests for public coupon validation.
//!
//! Run with: cargo test -p seedleaf-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use seedleaf_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn unknown_code_not_found() {
    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(format!("{}/api/coupons/validate", ctx.base_url))
        .json(&json!({ "code": "NO-SUCH-CODE", "subtotal": "600" }))
        .send()
        .await
        .expect("validate failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn percentage_coupon_prices_cart() {
    // The seed endpoint creates WELCOME10: 10% off, no minimum.
    let ctx = TestContext::new();
    ctx.seeded_products().await;
    let resp = ctx
        .client
        .post(format!("{}/api/coupons/validate", ctx.base_url))
        .json(&json!({ "code": "welcome10", "subtotal": "600" }))
        .send()
        .await
        .expect("validate failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("not JSON");
    assert_eq!(body["valid"], true);
    assert_eq!(body["code"], "WELCOME10");
    assert_eq!(body["discount"], "60");
    // 600 clears free shipping; 600 - 60
    assert_eq!(body["total"], "540");
}
