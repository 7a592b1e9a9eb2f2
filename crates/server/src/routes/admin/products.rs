//! Admin catalog management.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductInput, Variant};
use crate::state::AppState;

/// All products, inactive included.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.db())
        .list(&ProductFilter::default())
        .await?;
    Ok(Json(products))
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 for a product without variants.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    validate(&input)?;
    let product = Product::from_input(input);
    ProductRepository::new(state.db()).insert(&product).await?;
    tracing::info!(product_id = %product.id, "Product created");
    Ok(Json(product))
}

/// Replace a product's editable fields, keeping id and `created_at`.
///
/// # Errors
///
/// Returns 404 for an unknown product.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    validate(&input)?;
    let repo = ProductRepository::new(state.db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let updated = Product {
        id: existing.id,
        name: input.name,
        description: input.description,
        category: input.category,
        images: input.images,
        variants: input.variants.into_iter().map(Variant::from_input).collect(),
        is_featured: input.is_featured,
        is_active: input.is_active,
        created_at: existing.created_at,
        updated_at: chrono::Utc::now(),
    };
    if !repo.replace(&updated).await? {
        return Err(AppError::NotFound("Product".to_string()));
    }
    Ok(Json(updated))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 for an unknown product.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !ProductRepository::new(state.db()).delete(&id).await? {
        return Err(AppError::NotFound("Product".to_string()));
    }
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(json!({ "deleted": true })))
}

fn validate(input: &ProductInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()));
    }
    if input.variants.is_empty() {
        return Err(AppError::BadRequest(
            "A product needs at least one variant".to_string(),
        ));
    }
    for variant in &input.variants {
        if variant.stock < 0 {
            return Err(AppError::BadRequest(
                "Variant stock cannot be negative".to_string(),
            ));
        }
    }
    Ok(())
}
