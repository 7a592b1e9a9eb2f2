//! Settings repository.
//!
//! The `settings` collection holds one document per configuration area,
//! keyed by a `type` field. The typed payload is flattened into the same
//! document next to the key.

use mongodb::Database;
use mongodb::bson::{Document, doc, from_document, to_document};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::RepositoryError;

const COLLECTION: &str = "settings";

/// Repository for settings documents.
pub struct SettingsRepository<'a> {
    db: &'a Database,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.db.collection(COLLECTION)
    }

    /// Load the settings document for an area, if one has been stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored document
    /// does not deserialize into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        area: &str,
    ) -> Result<Option<T>, RepositoryError> {
        let Some(mut document) = self.collection().find_one(doc! { "type": area }).await? else {
            return Ok(None);
        };
        document.remove("_id");
        document.remove("type");
        let value = from_document(document).map_err(|e| {
            RepositoryError::DataCorruption(format!("settings document `{area}`: {e}"))
        })?;
        Ok(Some(value))
    }

    /// Store the settings document for an area, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if `T` does not serialize
    /// to a document.
    pub async fn put<T: Serialize>(&self, area: &str, value: &T) -> Result<(), RepositoryError> {
        let mut document = to_document(value).map_err(|e| {
            RepositoryError::DataCorruption(format!("settings payload `{area}`: {e}"))
        })?;
        document.insert("type", area);
        self.collection()
            .update_one(doc! { "type": area }, doc! { "$set": document })
            .upsert(true)
            .await?;
        Ok(())
    }
}
