//! Product documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable pack size of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    /// Human label, e.g. "50 seeds" or "250 g".
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Strike-through price; `None` when the variant is not on offer.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub compare_at_price: Option<Decimal>,
    pub stock: i64,
}

/// A product document as stored in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::rfc3339_micros")]
    pub updated_at: DateTime<Utc>,
}

const fn default_true() -> bool {
    true
}

/// Input payload for creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub variants: Vec<VariantInput>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Input payload for a variant. An existing variant keeps its `id`;
/// a new one gets a fresh UUID.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantInput {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub compare_at_price: Option<Decimal>,
    pub stock: i64,
}

impl Product {
    /// Build a new document from input.
    #[must_use]
    pub fn from_input(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            category: input.category,
            images: input.images,
            variants: input.variants.into_iter().map(Variant::from_input).collect(),
            is_featured: input.is_featured,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a variant by id.
    #[must_use]
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Total stock across all variants.
    #[must_use]
    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }
}

impl Variant {
    #[must_use]
    pub fn from_input(input: VariantInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            label: input.label,
            price: input.price,
            compare_at_price: input.compare_at_price,
            stock: input.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ProductInput {
        ProductInput {
            name: "Tomato Seeds".to_string(),
            description: "Heirloom tomato".to_string(),
            category: "Vegetable Seeds".to_string(),
            images: vec![],
            variants: vec![
                VariantInput {
                    id: None,
                    label: "50 seeds".to_string(),
                    price: Decimal::from(99),
                    compare_at_price: None,
                    stock: 20,
                },
                VariantInput {
                    id: Some("keep-me".to_string()),
                    label: "200 seeds".to_string(),
                    price: Decimal::from(299),
                    compare_at_price: Some(Decimal::from(349)),
                    stock: 5,
                },
            ],
            is_featured: true,
            is_active: true,
        }
    }

    #[test]
    fn from_input_assigns_ids_and_keeps_existing() {
        let product = Product::from_input(sample_input());
        assert!(!product.variants[0].id.is_empty());
        assert_eq!(product.variants[1].id, "keep-me");
        assert_eq!(product.total_stock(), 25);
    }

    #[test]
    fn variant_lookup() {
        let product = Product::from_input(sample_input());
        assert!(product.variant("keep-me").is_some());
        assert!(product.variant("missing").is_none());
    }

    #[test]
    fn prices_serialize_as_strings() {
        let product = Product::from_input(sample_input());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["variants"][0]["price"], "99");
        assert_eq!(json["variants"][1]["compare_at_price"], "349");
    }

    #[test]
    fn is_active_defaults_to_true() {
        let json = serde_json::json!({
            "id": "p1",
            "name": "Basil",
            "description": "Sweet basil",
            "category": "Herb Seeds",
            "variants": [],
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.is_active);
        assert!(!product.is_featured);
    }
}
