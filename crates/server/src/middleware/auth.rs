//! Bearer-token extractors.
//!
//! `CurrentUser` authenticates any account; `RequireAdmin` additionally
//! requires the admin role. Both reject with the JSON error body rather
//! than redirecting, since every caller is an API client.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use seedleaf_core::UserRole;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated account, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;
        let claims = state.auth().decode_token(token)?;

        crate::error::set_sentry_user(&claims.sub, Some(&claims.email));

        Ok(Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// An authenticated admin account.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(Self(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/api/auth/me")
            .header(AUTHORIZATION, value)
            .body(())
            .expect("request")
            .into_parts();
        parts
    }

    #[test]
    fn bearer_token_extracted() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn missing_header_rejected() {
        let (parts, ()) = Request::builder()
            .uri("/api/auth/me")
            .body(())
            .expect("request")
            .into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
