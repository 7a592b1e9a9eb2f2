//! Coupon documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use seedleaf_core::{CouponPolicy, DiscountType};

/// A coupon document as stored in the `coupons` collection.
///
/// Codes are stored uppercase; lookups uppercase the input first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_order_value: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(with = "super::rfc3339_micros")]
    pub valid_from: DateTime<Utc>,
    #[serde(with = "super::rfc3339_micros")]
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating or updating a coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponInput {
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub min_order_value: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

impl Coupon {
    /// Build a new document from input. The code is uppercased.
    #[must_use]
    pub fn from_input(input: CouponInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: input.code.trim().to_uppercase(),
            discount_type: input.discount_type,
            discount_value: input.discount_value,
            min_order_value: input.min_order_value.unwrap_or(Decimal::ZERO),
            max_discount: input.max_discount,
            usage_limit: input.usage_limit,
            usage_count: 0,
            valid_from: input.valid_from,
            valid_until: input.valid_until,
            is_active: input.is_active,
            created_at: Utc::now(),
        }
    }

    /// The evaluation view of this coupon.
    #[must_use]
    pub fn policy(&self) -> CouponPolicy {
        CouponPolicy {
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_value: self.min_order_value,
            max_discount: self.max_discount,
            usage_limit: self.usage_limit,
            usage_count: self.usage_count,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn codes_are_uppercased() {
        let now = Utc::now();
        let coupon = Coupon::from_input(CouponInput {
            code: " welcome10 ".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(10),
            min_order_value: None,
            max_discount: None,
            usage_limit: None,
            valid_from: now,
            valid_until: now + Duration::days(30),
            is_active: true,
        });
        assert_eq!(coupon.code, "WELCOME10");
        assert_eq!(coupon.min_order_value, Decimal::ZERO);
        assert_eq!(coupon.usage_count, 0);
    }

    #[test]
    fn policy_mirrors_document_fields() {
        let now = Utc::now();
        let coupon = Coupon::from_input(CouponInput {
            code: "FLAT50".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(50),
            min_order_value: Some(Decimal::from(300)),
            max_discount: None,
            usage_limit: Some(100),
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            is_active: true,
        });
        let policy = coupon.policy();
        let discount = policy.discount_for(Decimal::from(400), now).unwrap();
        assert_eq!(discount, Decimal::from(50));
    }
}
