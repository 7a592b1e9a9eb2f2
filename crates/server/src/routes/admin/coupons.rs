//! Admin coupon management.

use axum::Json;
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use seedleaf_core::DiscountType;

use crate::db::{CouponRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Coupon, CouponInput};
use crate::state::AppState;

/// All coupons, newest first.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<Coupon>>> {
    let coupons = CouponRepository::new(state.db()).list().await?;
    Ok(Json(coupons))
}

/// Create a coupon.
///
/// # Errors
///
/// Returns 409 for a duplicate code, 400 for invalid values.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(input): Json<CouponInput>,
) -> Result<Json<Coupon>> {
    validate(&input)?;
    let coupon = Coupon::from_input(input);
    CouponRepository::new(state.db())
        .insert(&coupon)
        .await
        .map_err(conflict_to_client)?;
    tracing::info!(code = %coupon.code, "Coupon created");
    Ok(Json(coupon))
}

/// Update a coupon's terms, keeping its usage count.
///
/// # Errors
///
/// Returns 404 for an unknown coupon, 409 for a code collision.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<CouponInput>,
) -> Result<Json<Coupon>> {
    validate(&input)?;
    let repo = CouponRepository::new(state.db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Coupon".to_string()))?;

    let updated = Coupon {
        id: existing.id,
        code: input.code.trim().to_uppercase(),
        discount_type: input.discount_type,
        discount_value: input.discount_value,
        min_order_value: input.min_order_value.unwrap_or(Decimal::ZERO),
        max_discount: input.max_discount,
        usage_limit: input.usage_limit,
        usage_count: existing.usage_count,
        valid_from: input.valid_from,
        valid_until: input.valid_until,
        is_active: input.is_active,
        created_at: existing.created_at,
    };
    if !repo.replace(&updated).await.map_err(conflict_to_client)? {
        return Err(AppError::NotFound("Coupon".to_string()));
    }
    Ok(Json(updated))
}

/// Delete a coupon.
///
/// # Errors
///
/// Returns 404 for an unknown coupon.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !CouponRepository::new(state.db()).delete(&id).await? {
        return Err(AppError::NotFound("Coupon".to_string()));
    }
    tracing::info!(coupon_id = %id, "Coupon deleted");
    Ok(Json(json!({ "deleted": true })))
}

fn validate(input: &CouponInput) -> Result<()> {
    if input.code.trim().is_empty() {
        return Err(AppError::BadRequest("Coupon code is required".to_string()));
    }
    if input.discount_value <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Discount value must be positive".to_string(),
        ));
    }
    if input.discount_type == DiscountType::Percentage
        && input.discount_value > Decimal::from(100)
    {
        return Err(AppError::BadRequest(
            "Percentage discount cannot exceed 100".to_string(),
        ));
    }
    if input.valid_until <= input.valid_from {
        return Err(AppError::BadRequest(
            "Validity window must end after it starts".to_string(),
        ));
    }
    Ok(())
}

fn conflict_to_client(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::Conflict(msg) => AppError::Conflict(msg),
        other => AppError::Database(other),
    }
}
