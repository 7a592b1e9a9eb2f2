//! Contact-message repository.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use super::RepositoryError;
use crate::models::ContactMessage;

const COLLECTION: &str = "contact_messages";

/// Repository for contact-form submissions.
pub struct ContactRepository<'a> {
    db: &'a Database,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<ContactMessage> {
        self.db.collection(COLLECTION)
    }

    /// Insert a new message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        self.collection().insert_one(message).await?;
        Ok(())
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Mark a message read. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_read(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .update_one(doc! { "id": id }, doc! { "$set": { "is_read": true } })
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Delete a message. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = self.collection().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Number of unread messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_unread(&self) -> Result<u64, RepositoryError> {
        let count = self
            .collection()
            .count_documents(doc! { "is_read": false })
            .await?;
        Ok(count)
    }
}
