//! Account registration and login.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{User, UserProfile};
use crate::services::auth::{AuthError, validate_email};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Create an account and return a token for it.
///
/// # Errors
///
/// Returns 409 when the email is taken, 400 for invalid input.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    validate_email(&payload.email)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let password_hash = state.auth().hash_password(&payload.password)?;
    let user = User::new_customer(
        payload.email.trim().to_lowercase(),
        payload.name.trim().to_string(),
        payload.phone,
        password_hash,
    );

    UserRepository::new(state.db())
        .insert(&user)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::Auth(AuthError::EmailTaken),
            other => AppError::Database(other),
        })?;

    tracing::info!(user_id = %user.id, "Account registered");

    let token = state.auth().issue_token(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Exchange credentials for a bearer token.
///
/// # Errors
///
/// Returns 401 for a wrong email or password.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = UserRepository::new(state.db())
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    state
        .auth()
        .verify_password(&payload.password, &user.password_hash)?;

    let token = state.auth().issue_token(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// The current user's profile.
///
/// # Errors
///
/// Returns 401 without a valid token, 404 when the account was removed.
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserProfile>> {
    let profile = UserRepository::new(state.db())
        .find_by_id(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;
    Ok(Json(profile.into()))
}
