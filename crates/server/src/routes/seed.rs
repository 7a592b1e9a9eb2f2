//! Demo-data bootstrap.
//!
//! Seeds an admin account, a small catalog, and a welcome coupon. Every
//! section checks for existing data first, so repeated calls report what
//! is already there instead of duplicating it.

use axum::Json;
use axum::extract::State;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

use seedleaf_core::{DiscountType, UserRole};

use crate::db::{CouponRepository, ProductFilter, ProductRepository, UserRepository};
use crate::error::Result;
use crate::models::{Coupon, CouponInput, Product, ProductInput, User, VariantInput};
use crate::state::AppState;

const DEFAULT_ADMIN_EMAIL: &str = "admin@seedleaf.local";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me-now";

/// Seed demo data: admin account, catalog, and a welcome coupon.
///
/// Admin credentials come from `ADMIN_EMAIL` / `ADMIN_PASSWORD`, falling
/// back to documented defaults meant for local development only.
///
/// # Errors
///
/// Returns a database error when inserts fail.
pub async fn seed(State(state): State<AppState>) -> Result<Json<Value>> {
    let admin_created = seed_admin(&state).await?;
    let products_created = seed_catalog(&state).await?;
    let coupon_created = seed_coupon(&state).await?;

    Ok(Json(json!({
        "admin_created": admin_created,
        "products_created": products_created,
        "coupon_created": coupon_created,
    })))
}

async fn seed_admin(state: &AppState) -> Result<bool> {
    let email = std::env::var("ADMIN_EMAIL")
        .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string())
        .to_lowercase();
    let users = UserRepository::new(state.db());
    if users.find_by_email(&email).await?.is_some() {
        return Ok(false);
    }

    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
    let admin = User {
        id: Uuid::new_v4().to_string(),
        email: email.clone(),
        name: "Store Admin".to_string(),
        phone: None,
        password_hash: state.auth().hash_password(&password)?,
        role: UserRole::Admin,
        created_at: Utc::now(),
    };
    users.insert(&admin).await?;
    tracing::info!(%email, "Admin account seeded");
    Ok(true)
}

async fn seed_catalog(state: &AppState) -> Result<usize> {
    let repo = ProductRepository::new(state.db());
    let existing = repo.list(&ProductFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(0);
    }

    let mut inserted = 0usize;
    for input in demo_products() {
        repo.insert(&Product::from_input(input)).await?;
        inserted += 1;
    }
    tracing::info!(count = inserted, "Demo catalog seeded");
    Ok(inserted)
}

async fn seed_coupon(state: &AppState) -> Result<bool> {
    let coupons = CouponRepository::new(state.db());
    if coupons.find_by_code("WELCOME10").await?.is_some() {
        return Ok(false);
    }

    let now = Utc::now();
    coupons
        .insert(&Coupon::from_input(CouponInput {
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(10),
            min_order_value: None,
            max_discount: None,
            usage_limit: None,
            valid_from: now,
            valid_until: now + Duration::days(365),
            is_active: true,
        }))
        .await?;
    tracing::info!("Welcome coupon seeded");
    Ok(true)
}

fn demo_products() -> Vec<ProductInput> {
    vec![
        ProductInput {
            name: "Desi Tomato Seeds".to_string(),
            description: "Open-pollinated tomato suited to kitchen gardens. \
                          Sow after the last frost; fruits in 70 days."
                .to_string(),
            category: "Vegetable Seeds".to_string(),
            images: vec![],
            variants: vec![
                VariantInput {
                    id: None,
                    label: "50 seeds".to_string(),
                    price: Decimal::from(99),
                    compare_at_price: None,
                    stock: 100,
                },
                VariantInput {
                    id: None,
                    label: "200 seeds".to_string(),
                    price: Decimal::from(299),
                    compare_at_price: Some(Decimal::from(349)),
                    stock: 40,
                },
            ],
            is_featured: true,
            is_active: true,
        },
        ProductInput {
            name: "Holy Basil (Tulsi) Seeds".to_string(),
            description: "Aromatic tulsi for pots and beds. Germinates in \
                          one to two weeks with regular watering."
                .to_string(),
            category: "Herb Seeds".to_string(),
            images: vec![],
            variants: vec![VariantInput {
                id: None,
                label: "100 seeds".to_string(),
                price: Decimal::from(79),
                compare_at_price: None,
                stock: 150,
            }],
            is_featured: true,
            is_active: true,
        },
        ProductInput {
            name: "Vermicompost".to_string(),
            description: "Screened vermicompost for beds, pots, and lawns."
                .to_string(),
            category: "Soil & Fertilizer".to_string(),
            images: vec![],
            variants: vec![
                VariantInput {
                    id: None,
                    label: "1 kg".to_string(),
                    price: Decimal::from(149),
                    compare_at_price: None,
                    stock: 60,
                },
                VariantInput {
                    id: None,
                    label: "5 kg".to_string(),
                    price: Decimal::from(599),
                    compare_at_price: Some(Decimal::from(699)),
                    stock: 25,
                },
            ],
            is_featured: false,
            is_active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_well_formed() {
        let products = demo_products();
        assert_eq!(products.len(), 3);
        for input in products {
            assert!(!input.variants.is_empty());
            for variant in &input.variants {
                assert!(variant.price > Decimal::ZERO);
                assert!(variant.stock > 0);
            }
        }
    }
}
