//! Admin contact-message inbox.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::ContactMessage;
use crate::state::AppState;

/// All contact messages, newest first.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = ContactRepository::new(state.db()).list().await?;
    Ok(Json(messages))
}

/// Mark a message read.
///
/// # Errors
///
/// Returns 404 for an unknown message.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !ContactRepository::new(state.db()).mark_read(&id).await? {
        return Err(AppError::NotFound("Message".to_string()));
    }
    Ok(Json(json!({ "is_read": true })))
}

/// Delete a message.
///
/// # Errors
///
/// Returns 404 for an unknown message.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !ContactRepository::new(state.db()).delete(&id).await? {
        return Err(AppError::NotFound("Message".to_string()));
    }
    Ok(Json(json!({ "deleted": true })))
}
