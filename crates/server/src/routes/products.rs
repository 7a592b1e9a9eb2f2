//! Public catalog endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// List active products, optionally filtered by category or featured flag.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter {
        category: query.category,
        featured: query.featured,
        active_only: true,
    };
    let products = ProductRepository::new(state.db()).list(&filter).await?;
    Ok(Json(products))
}

/// One product by id. Inactive products are hidden from this endpoint.
///
/// # Errors
///
/// Returns 404 for unknown or inactive products.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.db())
        .find_by_id(&id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    Ok(Json(product))
}

/// Distinct category names across active products, with the catch-all
/// "All" entry the storefront filter bar expects first.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let mut categories = ProductRepository::new(state.db()).categories().await?;
    categories.insert(0, "All".to_string());
    Ok(Json(categories))
}
