//! Public coupon validation.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use seedleaf_core::OrderTotals;

use crate::db::CouponRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub code: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

/// Price a coupon against a cart subtotal without redeeming it.
///
/// # Errors
///
/// Returns 404 for an unknown code, 400 with the rejection reason when
/// the coupon does not apply.
pub async fn validate(
    State(state): State<AppState>,
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    let coupon = CouponRepository::new(state.db())
        .find_by_code(&payload.code)
        .await?
        .ok_or_else(|| AppError::NotFound("Coupon".to_string()))?;

    let discount = coupon
        .policy()
        .discount_for(payload.subtotal, Utc::now())
        .map_err(|rejection| AppError::BadRequest(rejection.to_string()))?;

    Ok(Json(ValidateResponse {
        valid: true,
        code: coupon.code,
        discount,
        totals: OrderTotals::compute(payload.subtotal, discount),
    }))
}
