//! Order repository.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use seedleaf_core::OrderStatus;

use super::RepositoryError;
use crate::models::Order;

const COLLECTION: &str = "orders";

/// Repository for order documents.
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Order> {
        self.db.collection(COLLECTION)
    }

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        self.collection().insert_one(order).await?;
        Ok(())
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>, RepositoryError> {
        let order = self.collection().find_one(doc! { "id": id }).await?;
        Ok(order)
    }

    /// Get an order by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = self
            .collection()
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(order)
    }

    /// All orders for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .collection()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// All orders, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut query = doc! {};
        if let Some(status) = status {
            query.insert("status", status.to_string());
        }
        let orders = self
            .collection()
            .find(query)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// The most recent orders, for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// Mark an order paid and confirmed, recording the payment id.
    ///
    /// The filter requires `payment_status` to still be pending, so a
    /// replayed confirmation matches nothing and returns false. Callers
    /// treat that as a no-op rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_paid(&self, id: &str, payment_id: &str) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(
                doc! { "id": id, "payment_status": "pending" },
                doc! { "$set": {
                    "payment_status": "paid",
                    "status": "confirmed",
                    "razorpay_payment_id": payment_id,
                    "updated_at": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
                } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// Update fulfilment status. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "status": status.to_string(),
                    "updated_at": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Number of orders, optionally by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, status: Option<OrderStatus>) -> Result<u64, RepositoryError> {
        let mut query = doc! {};
        if let Some(status) = status {
            query.insert("status", status.to_string());
        }
        let count = self.collection().count_documents(query).await?;
        Ok(count)
    }

    /// All paid orders, for revenue aggregation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_paid(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .collection()
            .find(doc! { "payment_status": "paid" })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }
}
