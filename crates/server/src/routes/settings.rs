//! Public settings endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::Result;
use crate::models::SiteSettings;
use crate::state::AppState;

/// Public site settings for the storefront chrome.
///
/// # Errors
///
/// Returns a database error when the settings store cannot be read.
pub async fn site(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    let settings = state.settings().site().await?;
    Ok(Json(settings))
}

/// What the checkout page needs to open the gateway widget. Only the key
/// id is exposed; the secret never leaves the server.
///
/// # Errors
///
/// Returns a database error when the settings store cannot be read.
pub async fn payment_config(State(state): State<AppState>) -> Result<Json<Value>> {
    let razorpay = state.settings().razorpay().await?;
    Ok(Json(json!({
        "enabled": razorpay.enabled,
        "key_id": razorpay.key_id,
        "currency": "INR",
    })))
}
