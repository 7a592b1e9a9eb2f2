//! Health endpoints.

use axum::Json;
use axum::extract::State;
use mongodb::bson::doc;
use serde_json::{Value, json};

use crate::error::Result;
use crate::state::AppState;

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness check. Pings MongoDB so load balancers stop routing to an
/// instance that lost its database.
///
/// # Errors
///
/// Returns a database error when the ping fails.
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>> {
    state
        .db()
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(crate::db::RepositoryError::Database)?;
    Ok(Json(json!({ "status": "ready" })))
}
