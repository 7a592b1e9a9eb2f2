//! Admin inventory management.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

/// One variant's stock position.
#[derive(Debug, Serialize)]
pub struct StockRow {
    pub product_id: String,
    pub product_name: String,
    pub variant_id: String,
    pub variant_label: String,
    pub stock: i64,
    pub low_stock: bool,
}

/// Every variant's stock, flattened to one row per variant, with a
/// low-stock flag at the given threshold (default 10).
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<StockRow>>> {
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let products = ProductRepository::new(state.db())
        .list(&ProductFilter::default())
        .await?;

    let mut rows = Vec::new();
    for product in products {
        for variant in product.variants {
            rows.push(StockRow {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                variant_id: variant.id,
                variant_label: variant.label,
                stock: variant.stock,
                low_stock: variant.stock < threshold,
            });
        }
    }
    rows.sort_by(|a, b| a.stock.cmp(&b.stock));
    Ok(Json(rows))
}

/// Set a variant's stock to an absolute value.
///
/// # Errors
///
/// Returns 400 for a negative value, 404 for an unknown variant.
pub async fn set_stock(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path((product_id, variant_id)): Path<(String, String)>,
    Json(payload): Json<StockUpdate>,
) -> Result<Json<Value>> {
    if payload.stock < 0 {
        return Err(AppError::BadRequest(
            "Stock cannot be negative".to_string(),
        ));
    }
    let updated = ProductRepository::new(state.db())
        .set_stock(&product_id, &variant_id, payload.stock)
        .await?;
    if !updated {
        return Err(AppError::NotFound("Variant".to_string()));
    }
    tracing::info!(%product_id, %variant_id, stock = payload.stock, "Stock adjusted");
    Ok(Json(json!({ "stock": payload.stock })))
}
