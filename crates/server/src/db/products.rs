//! Product repository.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, doc};

use super::RepositoryError;
use crate::models::Product;

const COLLECTION: &str = "products";

/// Filters accepted by the public catalog listing.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// When false, inactive products are included (admin listings).
    pub active_only: bool,
}

/// Repository for product documents.
pub struct ProductRepository<'a> {
    db: &'a Database,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Product> {
        self.db.collection(COLLECTION)
    }

    /// List products matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = doc! {};
        if filter.active_only {
            query.insert("is_active", true);
        }
        if let Some(category) = &filter.category {
            query.insert("category", category);
        }
        if let Some(featured) = filter.featured {
            query.insert("is_featured", featured);
        }
        let products = self
            .collection()
            .find(query)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        let product = self.collection().find_one(doc! { "id": id }).await?;
        Ok(product)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        self.collection().insert_one(product).await?;
        Ok(())
    }

    /// Replace a product document, keeping its id and `created_at`.
    /// Returns false when no product with that id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn replace(&self, product: &Product) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .replace_one(doc! { "id": &product.id }, product)
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Delete a product. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = self.collection().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Distinct category names across active products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let values = self
            .collection()
            .distinct("category", doc! { "is_active": true })
            .await?;
        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect();
        categories.sort();
        Ok(categories)
    }

    /// Atomically take `quantity` units from a variant's stock.
    ///
    /// The filter requires the variant to still hold at least `quantity`
    /// units, so concurrent decrements can never drive stock negative.
    /// Returns false when the product, variant, or stock is missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn take_stock(
        &self,
        product_id: &str,
        variant_id: &str,
        quantity: i64,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(
                doc! {
                    "id": product_id,
                    "variants": {
                        "$elemMatch": { "id": variant_id, "stock": { "$gte": quantity } }
                    },
                },
                doc! { "$inc": { "variants.$.stock": -quantity } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// Set a variant's stock to an absolute value. Returns false when the
    /// product or variant does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_stock(
        &self,
        product_id: &str,
        variant_id: &str,
        stock: i64,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(
                doc! { "id": product_id, "variants.id": variant_id },
                doc! { "$set": { "variants.$.stock": stock } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Number of active products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<u64, RepositoryError> {
        let count = self
            .collection()
            .count_documents(doc! { "is_active": true })
            .await?;
        Ok(count)
    }
}
