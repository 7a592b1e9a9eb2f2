//! Database operations for MongoDB.
//!
//! All documents are keyed by an application-generated UUID string `id`;
//! Mongo's `_id` is never exposed. Repositories borrow the [`Database`]
//! handle and are constructed per call site.
//!
//! ## Collections
//!
//! - `users` - Accounts (unique index on `email`)
//! - `products` - Catalog with embedded variants
//! - `orders` - Checkout results with frozen line items
//! - `coupons` - Discount codes (unique index on `code`)
//! - `settings` - One document per area, keyed by `type`
//! - `contact_messages` - Contact-form submissions

mod contact;
mod coupons;
mod orders;
mod products;
mod settings;
mod users;

pub use contact::ContactRepository;
pub use coupons::CouponRepository;
pub use orders::OrderRepository;
pub use products::{ProductFilter, ProductRepository};
pub use settings::SettingsRepository;
pub use users::UserRepository;

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use secrecy::ExposeSecret;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying driver error.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A unique constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored document could not be interpreted.
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Connect to MongoDB and return a handle to the named database.
///
/// # Errors
///
/// Returns `mongodb::error::Error` if the connection string is invalid.
pub async fn connect(
    mongo_url: &secrecy::SecretString,
    db_name: &str,
) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(mongo_url.expose_secret()).await?;
    Ok(client.database(db_name))
}

/// Create the indexes the repositories rely on. Safe to run on every boot.
///
/// # Errors
///
/// Returns `mongodb::error::Error` if index creation fails.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let unique = || IndexOptions::builder().unique(true).build();

    db.collection::<mongodb::bson::Document>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    for collection in ["users", "products", "orders", "coupons", "contact_messages"] {
        db.collection::<mongodb::bson::Document>(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
    }

    db.collection::<mongodb::bson::Document>("coupons")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    db.collection::<mongodb::bson::Document>("settings")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "type": 1 })
                .options(unique())
                .build(),
        )
        .await?;

    db.collection::<mongodb::bson::Document>("orders")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "created_at": -1 })
                .build(),
        )
        .await?;

    Ok(())
}

/// Whether a driver error is a duplicate-key write failure.
#[must_use]
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
        ErrorKind::Command(command_err) => command_err.code == 11000,
        _ => false,
    }
}
