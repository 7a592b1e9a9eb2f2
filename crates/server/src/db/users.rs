//! User repository.

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use super::{RepositoryError, is_duplicate_key};
use crate::models::User;

const COLLECTION: &str = "users";

/// Repository for user documents.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.db.collection(COLLECTION)
    }

    /// Get a user by their email address. The lookup is lowercased so
    /// registration and login agree on case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = self
            .collection()
            .find_one(doc! { "email": email.to_lowercase() })
            .await?;
        Ok(user)
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let user = self.collection().find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    pub async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        self.collection().insert_one(user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::Conflict("email already registered".to_string())
            } else {
                RepositoryError::Database(e)
            }
        })?;
        Ok(())
    }

    /// All customer accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_customers(&self) -> Result<Vec<User>, RepositoryError> {
        let users = self
            .collection()
            .find(doc! { "role": "customer" })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    /// Number of customer accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_customers(&self) -> Result<u64, RepositoryError> {
        let count = self
            .collection()
            .count_documents(doc! { "role": "customer" })
            .await?;
        Ok(count)
    }
}
