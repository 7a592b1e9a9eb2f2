//! Document models for every MongoDB collection.
//!
//! Every document carries an application-generated UUID `id` distinct
//! from Mongo's `_id`; queries and references always go through `id`.
//! Timestamps are RFC 3339 strings with fixed microsecond precision
//! (see [`rfc3339_micros`]), so lexicographic sorts on `created_at` are
//! chronological. Money fields are `Decimal` values serialized as
//! strings.

pub mod contact;
pub mod coupon;
pub mod order;
pub mod product;
pub mod settings;
pub mod user;

/// Serde helper for timestamps: RFC 3339 with exactly six fractional
/// digits and a `Z` suffix, matching the strings raw `doc!` updates
/// write. Uniform width keeps lexicographic ordering chronological
/// within a second.
pub mod rfc3339_micros {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    /// # Errors
    ///
    /// Fails when the stored string is not valid RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

pub use contact::{ContactInput, ContactMessage};
pub use coupon::{Coupon, CouponInput};
pub use order::{Address, CartLine, CreateOrderRequest, Order, OrderItem, VerifyPaymentRequest};
pub use product::{Product, ProductInput, Variant, VariantInput};
pub use settings::{RazorpaySettings, SiteSettings, SmtpSettings, WhatsAppSettings};
pub use user::{User, UserProfile};
