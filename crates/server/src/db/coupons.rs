//! Coupon repository.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use super::{RepositoryError, is_duplicate_key};
use crate::models::Coupon;

const COLLECTION: &str = "coupons";

/// Repository for coupon documents.
pub struct CouponRepository<'a> {
    db: &'a Database,
}

impl<'a> CouponRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Coupon> {
        self.db.collection(COLLECTION)
    }

    /// Get a coupon by code. The lookup is uppercased to match storage.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let coupon = self
            .collection()
            .find_one(doc! { "code": code.trim().to_uppercase() })
            .await?;
        Ok(coupon)
    }

    /// Get a coupon by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Coupon>, RepositoryError> {
        let coupon = self.collection().find_one(doc! { "id": id }).await?;
        Ok(coupon)
    }

    /// Insert a new coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is already taken.
    pub async fn insert(&self, coupon: &Coupon) -> Result<(), RepositoryError> {
        self.collection().insert_one(coupon).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::Conflict("coupon code already exists".to_string())
            } else {
                RepositoryError::Database(e)
            }
        })?;
        Ok(())
    }

    /// All coupons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let coupons = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(coupons)
    }

    /// Replace a coupon document, keeping its id, usage count, and
    /// `created_at`. Returns false when no coupon with that id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new code collides.
    pub async fn replace(&self, coupon: &Coupon) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .replace_one(doc! { "id": &coupon.id }, coupon)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    RepositoryError::Conflict("coupon code already exists".to_string())
                } else {
                    RepositoryError::Database(e)
                }
            })?;
        Ok(result.matched_count > 0)
    }

    /// Delete a coupon. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = self.collection().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Atomically count one redemption against the coupon.
    ///
    /// The filter enforces the usage cap, so two simultaneous checkouts
    /// cannot both take the last slot. Returns false when the cap is
    /// already reached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn redeem(&self, code: &str) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(
                doc! {
                    "code": code.trim().to_uppercase(),
                    "$or": [
                        { "usage_limit": null },
                        { "$expr": { "$lt": ["$usage_count", "$usage_limit"] } },
                    ],
                },
                doc! { "$inc": { "usage_count": 1 } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
