//! Integration tests for checkout and payment verification.
//!
//! These tests require the API server to point `RAZORPAY_BASE_URL` at a
//! gateway stub that accepts order creation.
//!
//! Run with: cargo test -p seedleaf-integration-tests -- --ignored

use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use serde_json::{Value, json};
use sha2::Sha256;

use seedleaf_integration_tests::TestContext;

/// Sign a confirmation the way the gateway does, so a test can play the
/// part of a successful payment. Requires the server's key secret.
fn gateway_signature(secret: &str, gateway_order_id: &str, payment_id: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{gateway_order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn sample_address() -> Value {
    json!({
        "full_name": "Asha Rao",
        "phone": "9876543210",
        "line1": "12 Garden Lane",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
    })
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, and a gateway stub"]
async fn checkout_requires_auth() {
    let ctx = TestContext::new();
    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .json(&json!({ "items": [], "address": sample_address() }))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, and a gateway stub"]
async fn empty_cart_rejected() {
    let ctx = TestContext::new();
    let token = ctx.register_customer().await;
    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({ "items": [], "address": sample_address() }))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("not JSON");
    assert_eq!(body["detail"], "Cart is empty");
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, and a gateway stub"]
async fn checkout_freezes_prices_without_moving_stock() {
    let ctx = TestContext::new();
    let token = ctx.register_customer().await;
    let products = ctx.seeded_products().await;
    let product = &products[0];
    let variant = &product["variants"][0];
    let stock_before = variant["stock"].as_i64().expect("stock");

    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "items": [{
                "product_id": product["id"],
                "variant_id": variant["id"],
                "quantity": 2,
            }],
            "address": sample_address(),
        }))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("not JSON");

    let order = &body["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["items"][0]["unit_price"], variant["price"]);
    assert!(body["payment"]["razorpay_order_id"].is_string());
    assert!(body["payment"]["amount"].is_i64());

    // Stock only moves once a verified payment lands
    let resp = ctx
        .client
        .get(format!(
            "{}/api/products/{}",
            ctx.base_url,
            product["id"].as_str().expect("id")
        ))
        .send()
        .await
        .expect("detail failed");
    let after: Value = resp.json().await.expect("not JSON");
    assert_eq!(after["variants"][0]["stock"].as_i64(), Some(stock_before));

    // The order shows up in the owner's history
    let resp = ctx
        .client
        .get(format!("{}/api/orders/mine", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("mine failed");
    let mine: Vec<Value> = resp.json().await.expect("not JSON");
    assert!(mine.iter().any(|o| o["id"] == order["id"]));
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, and a gateway stub"]
async fn forged_signature_rejected() {
    let ctx = TestContext::new();
    let token = ctx.register_customer().await;
    let products = ctx.seeded_products().await;
    let product = &products[0];

    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "items": [{
                "product_id": product["id"],
                "variant_id": product["variants"][0]["id"],
                "quantity": 1,
            }],
            "address": sample_address(),
        }))
        .send()
        .await
        .expect("checkout failed");
    let body: Value = resp.json().await.expect("not JSON");
    let order_id = body["order"]["id"].as_str().expect("order id");
    let gateway_order_id = body["payment"]["razorpay_order_id"]
        .as_str()
        .expect("gateway order id");

    let resp = ctx
        .client
        .post(format!(
            "{}/api/orders/{order_id}/verify-payment",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({
            "razorpay_order_id": gateway_order_id,
            "razorpay_payment_id": "pay_forged",
            "razorpay_signature": "deadbeef",
        }))
        .send()
        .await
        .expect("verify failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Order stays unpaid
    let resp = ctx
        .client
        .get(format!("{}/api/orders/{order_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("show failed");
    let order: Value = resp.json().await.expect("not JSON");
    assert_eq!(order["payment_status"], "pending");
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, a gateway stub, and RAZORPAY_KEY_SECRET"]
async fn replayed_confirmation_decrements_stock_once() {
    // Signing needs the same secret the server verifies with.
    let secret = std::env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET not set");
    let ctx = TestContext::new();
    let token = ctx.register_customer().await;
    let products = ctx.seeded_products().await;
    let product = &products[0];
    let variant = &product["variants"][0];
    let stock_before = variant["stock"].as_i64().expect("stock");

    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "items": [{
                "product_id": product["id"],
                "variant_id": variant["id"],
                "quantity": 3,
            }],
            "address": sample_address(),
        }))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("not JSON");
    let order_id = body["order"]["id"].as_str().expect("order id");
    let gateway_order_id = body["payment"]["razorpay_order_id"]
        .as_str()
        .expect("gateway order id");

    let payment_id = "pay_integration_replay";
    let confirmation = json!({
        "razorpay_order_id": gateway_order_id,
        "razorpay_payment_id": payment_id,
        "razorpay_signature": gateway_signature(&secret, gateway_order_id, payment_id),
    });

    let resp = ctx
        .client
        .post(format!(
            "{}/api/orders/{order_id}/verify-payment",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&confirmation)
        .send()
        .await
        .expect("verify failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let paid: Value = resp.json().await.expect("not JSON");
    assert_eq!(paid["payment_status"], "paid");
    assert_eq!(paid["status"], "confirmed");
    assert_eq!(paid["razorpay_payment_id"], payment_id);

    // Replay the identical confirmation: success, no second decrement.
    let resp = ctx
        .client
        .post(format!(
            "{}/api/orders/{order_id}/verify-payment",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&confirmation)
        .send()
        .await
        .expect("replay failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let replayed: Value = resp.json().await.expect("not JSON");
    assert_eq!(replayed["payment_status"], "paid");
    assert_eq!(replayed["updated_at"], paid["updated_at"]);

    let resp = ctx
        .client
        .get(format!(
            "{}/api/products/{}",
            ctx.base_url,
            product["id"].as_str().expect("id")
        ))
        .send()
        .await
        .expect("detail failed");
    let after: Value = resp.json().await.expect("not JSON");
    assert_eq!(
        after["variants"][0]["stock"].as_i64(),
        Some(stock_before - 3)
    );
}

#[tokio::test]
#[ignore = "Requires running API server, MongoDB, and a gateway stub"]
async fn other_users_orders_hidden() {
    let ctx = TestContext::new();
    let owner = ctx.register_customer().await;
    let stranger = ctx.register_customer().await;
    let products = ctx.seeded_products().await;
    let product = &products[0];

    let resp = ctx
        .client
        .post(format!("{}/api/orders", ctx.base_url))
        .bearer_auth(&owner)
        .json(&json!({
            "items": [{
                "product_id": product["id"],
                "variant_id": product["variants"][0]["id"],
                "quantity": 1,
            }],
            "address": sample_address(),
        }))
        .send()
        .await
        .expect("checkout failed");
    let body: Value = resp.json().await.expect("not JSON");
    let order_id = body["order"]["id"].as_str().expect("order id");

    let resp = ctx
        .client
        .get(format!("{}/api/orders/{order_id}", ctx.base_url))
        .bearer_auth(&stranger)
        .send()
        .await
        .expect("show failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
