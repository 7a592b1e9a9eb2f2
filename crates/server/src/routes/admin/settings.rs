//! Admin settings management.
//!
//! Read endpoints mask stored secrets. Write endpoints accept a masked
//! value back unchanged, which means "keep the current secret", so the
//! admin UI can round-trip the settings form without ever holding the
//! real credential.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{RazorpaySettings, SmtpSettings, WhatsAppSettings};
use crate::state::AppState;

const MASK_PREFIX: &str = "****";

#[derive(Debug, Deserialize)]
pub struct SmtpTestRequest {
    pub to: String,
}

/// Stored SMTP settings with the password masked.
///
/// # Errors
///
/// Returns a database error when the settings store cannot be read.
pub async fn get_smtp(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<SmtpSettings>> {
    let settings = state.settings().smtp().await?;
    Ok(Json(settings.masked()))
}

/// Store SMTP settings.
///
/// # Errors
///
/// Returns a database error when the write fails.
pub async fn put_smtp(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(mut payload): Json<SmtpSettings>,
) -> Result<Json<SmtpSettings>> {
    if payload.password.starts_with(MASK_PREFIX) {
        payload.password = state.settings().smtp().await?.password;
    }
    state.settings().set_smtp(&payload).await?;
    tracing::info!(server = %payload.server, "SMTP settings updated");
    Ok(Json(payload.masked()))
}

/// Send a test email over the stored SMTP settings.
///
/// Unlike the transactional sends this is synchronous: the admin is
/// waiting to see whether the settings work.
///
/// # Errors
///
/// Returns 400 with the SMTP failure text when the send fails.
pub async fn test_smtp(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<SmtpTestRequest>,
) -> Result<Json<Value>> {
    let smtp = state.settings().smtp().await?;
    state
        .mailer()
        .send_test(&smtp, &payload.to)
        .await
        .map_err(|e| AppError::BadRequest(format!("SMTP test failed: {e}")))?;
    Ok(Json(json!({ "sent": true })))
}

/// Stored payment-gateway settings with the secret masked.
///
/// # Errors
///
/// Returns a database error when the settings store cannot be read.
pub async fn get_payment(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<RazorpaySettings>> {
    let settings = state.settings().razorpay().await?;
    Ok(Json(settings.masked()))
}

/// Store payment-gateway settings.
///
/// # Errors
///
/// Returns a database error when the write fails.
pub async fn put_payment(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(mut payload): Json<RazorpaySettings>,
) -> Result<Json<RazorpaySettings>> {
    if payload.key_secret.starts_with(MASK_PREFIX) {
        payload.key_secret = state.settings().razorpay().await?.key_secret;
    }
    state.settings().set_razorpay(&payload).await?;
    tracing::info!(enabled = payload.enabled, "Payment settings updated");
    Ok(Json(payload.masked()))
}

/// Stored WhatsApp settings.
///
/// # Errors
///
/// Returns a database error when the settings store cannot be read.
pub async fn get_whatsapp(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<WhatsAppSettings>> {
    let settings = state.settings().whatsapp().await?;
    Ok(Json(settings))
}

/// Store WhatsApp settings.
///
/// # Errors
///
/// Returns a database error when the write fails.
pub async fn put_whatsapp(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<WhatsAppSettings>,
) -> Result<Json<WhatsAppSettings>> {
    state.settings().set_whatsapp(&payload).await?;
    Ok(Json(payload))
}
