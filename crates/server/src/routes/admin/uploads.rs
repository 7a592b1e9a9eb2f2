//! Admin image uploads.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub url: String,
}

/// Store an uploaded image from a `file` multipart field and return its
/// public path.
///
/// # Errors
///
/// Returns 400 when no file field is present or the file is rejected.
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Upload has no filename".to_string()))?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?;

        let path = state.assets().save_upload(&filename, &bytes).await?;
        tracing::info!(%path, "Image uploaded");
        return Ok(Json(json!({ "url": path })));
    }
    Err(AppError::BadRequest(
        "Expected a `file` multipart field".to_string(),
    ))
}

/// Download a remote image and return the path of the local copy.
///
/// # Errors
///
/// Returns 400 for non-image responses, 502 when the download fails.
pub async fn fetch_remote(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<FetchRequest>,
) -> Result<Json<Value>> {
    if !payload.url.starts_with("http://") && !payload.url.starts_with("https://") {
        return Err(AppError::BadRequest("Invalid URL".to_string()));
    }
    let path = state.assets().fetch_remote(&payload.url).await?;
    tracing::info!(%path, source = %payload.url, "Remote image localized");
    Ok(Json(json!({ "url": path })))
}
