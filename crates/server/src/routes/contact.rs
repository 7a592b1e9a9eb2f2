//! Contact-form submission.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::models::{ContactInput, ContactMessage};
use crate::services::auth::validate_email;
use crate::state::AppState;

/// Store a contact message and notify the store inbox.
///
/// The notification email is sent in the background; a broken SMTP setup
/// must not lose the stored message or fail the submission.
///
/// # Errors
///
/// Returns 400 for empty fields or a malformed email.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<ContactInput>,
) -> Result<Json<Value>> {
    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and message are required".to_string(),
        ));
    }
    validate_email(&payload.email)?;

    let message = ContactMessage::from_input(payload);
    ContactRepository::new(state.db()).insert(&message).await?;

    let state_for_mail = state.clone();
    let message_for_mail = message.clone();
    tokio::spawn(async move {
        match state_for_mail.settings().smtp().await {
            Ok(smtp) => {
                let inbox = smtp.from_email.clone();
                if let Err(e) = state_for_mail
                    .mailer()
                    .send_contact_notification(&smtp, &inbox, &message_for_mail)
                    .await
                {
                    tracing::warn!(error = %e, "Contact notification email failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not load SMTP settings"),
        }
    });

    Ok(Json(json!({ "id": message.id, "status": "received" })))
}
