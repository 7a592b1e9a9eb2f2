//! Coupon validity and discount computation.
//!
//! A [`CouponPolicy`] is the pricing-relevant slice of a coupon document.
//! Checkout and the public validate endpoint both call
//! [`CouponPolicy::discount_for`], so the acceptance rules live in exactly
//! one place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::DiscountType;

/// Why a coupon was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponRejection {
    /// The coupon has been deactivated by an admin.
    #[error("Coupon is not active")]
    Inactive,

    /// Now is outside `[valid_from, valid_until]`.
    #[error("Coupon expired")]
    OutsideValidityWindow,

    /// The subtotal does not reach the coupon's minimum order value.
    #[error("Minimum order value is \u{20b9}{minimum}")]
    BelowMinimum { minimum: Decimal },

    /// The usage cap has been exhausted.
    #[error("Coupon usage limit reached")]
    UsageLimitReached,
}

/// The rules of a single coupon, independent of storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponPolicy {
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_value: Decimal,
    /// Cap for percentage discounts. Ignored for fixed discounts.
    pub max_discount: Option<Decimal>,
    /// Total number of redemptions allowed. `None` means unlimited.
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
}

impl CouponPolicy {
    /// Compute the discount this coupon grants on `subtotal` at `now`.
    ///
    /// Checks run in order: active flag, validity window, minimum order
    /// value, usage cap. A percentage discount is clamped to
    /// `max_discount` when set; a fixed discount never exceeds the
    /// subtotal.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`CouponRejection`].
    pub fn discount_for(
        &self,
        subtotal: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Decimal, CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }
        if now < self.valid_from || now > self.valid_until {
            return Err(CouponRejection::OutsideValidityWindow);
        }
        if subtotal < self.min_order_value {
            return Err(CouponRejection::BelowMinimum {
                minimum: self.min_order_value,
            });
        }
        if let Some(limit) = self.usage_limit
            && self.usage_count >= limit
        {
            return Err(CouponRejection::UsageLimitReached);
        }

        let discount = match self.discount_type {
            DiscountType::Percentage => {
                let raw = subtotal * self.discount_value / Decimal::from(100);
                match self.max_discount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
            DiscountType::Fixed => self.discount_value,
        };

        // A discount larger than the order is just the order.
        Ok(discount.min(subtotal))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn base_coupon() -> CouponPolicy {
        let now = Utc::now();
        CouponPolicy {
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(20),
            min_order_value: Decimal::from(500),
            max_discount: Some(Decimal::from(200)),
            usage_limit: Some(100),
            usage_count: 0,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(30),
            is_active: true,
        }
    }

    #[test]
    fn percentage_discount_applies() {
        let coupon = base_coupon();
        let discount = coupon
            .discount_for(Decimal::from(600), Utc::now())
            .unwrap();
        assert_eq!(discount, Decimal::from(120));
    }

    #[test]
    fn percentage_discount_clamped_to_cap() {
        let coupon = base_coupon();
        // 20% of 5000 is 1000, capped at 200.
        let discount = coupon
            .discount_for(Decimal::from(5000), Utc::now())
            .unwrap();
        assert_eq!(discount, Decimal::from(200));
    }

    #[test]
    fn percentage_without_cap_is_unclamped() {
        let coupon = CouponPolicy {
            max_discount: None,
            ..base_coupon()
        };
        let discount = coupon
            .discount_for(Decimal::from(5000), Utc::now())
            .unwrap();
        assert_eq!(discount, Decimal::from(1000));
    }

    #[test]
    fn fixed_discount_applies() {
        let coupon = CouponPolicy {
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(150),
            ..base_coupon()
        };
        let discount = coupon
            .discount_for(Decimal::from(600), Utc::now())
            .unwrap();
        assert_eq!(discount, Decimal::from(150));
    }

    #[test]
    fn fixed_discount_never_exceeds_subtotal() {
        let coupon = CouponPolicy {
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(800),
            min_order_value: Decimal::ZERO,
            ..base_coupon()
        };
        let discount = coupon
            .discount_for(Decimal::from(600), Utc::now())
            .unwrap();
        assert_eq!(discount, Decimal::from(600));
    }

    #[test]
    fn inactive_coupon_rejected() {
        let coupon = CouponPolicy {
            is_active: false,
            ..base_coupon()
        };
        assert_eq!(
            coupon.discount_for(Decimal::from(600), Utc::now()),
            Err(CouponRejection::Inactive)
        );
    }

    #[test]
    fn expired_coupon_rejected() {
        let coupon = base_coupon();
        let after = coupon.valid_until + Duration::seconds(1);
        assert_eq!(
            coupon.discount_for(Decimal::from(600), after),
            Err(CouponRejection::OutsideValidityWindow)
        );
    }

    #[test]
    fn future_coupon_rejected() {
        let coupon = base_coupon();
        let before = coupon.valid_from - Duration::seconds(1);
        assert_eq!(
            coupon.discount_for(Decimal::from(600), before),
            Err(CouponRejection::OutsideValidityWindow)
        );
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let coupon = base_coupon();
        assert!(
            coupon
                .discount_for(Decimal::from(600), coupon.valid_from)
                .is_ok()
        );
        assert!(
            coupon
                .discount_for(Decimal::from(600), coupon.valid_until)
                .is_ok()
        );
    }

    #[test]
    fn below_minimum_rejected_with_threshold() {
        let coupon = base_coupon();
        assert_eq!(
            coupon.discount_for(Decimal::from(499), Utc::now()),
            Err(CouponRejection::BelowMinimum {
                minimum: Decimal::from(500)
            })
        );
        // Exactly the minimum qualifies.
        assert!(
            coupon
                .discount_for(Decimal::from(500), Utc::now())
                .is_ok()
        );
    }

    #[test]
    fn usage_cap_exhaustion_rejected() {
        let coupon = CouponPolicy {
            usage_limit: Some(3),
            usage_count: 3,
            ..base_coupon()
        };
        assert_eq!(
            coupon.discount_for(Decimal::from(600), Utc::now()),
            Err(CouponRejection::UsageLimitReached)
        );
    }

    #[test]
    fn unlimited_usage_when_no_cap() {
        let coupon = CouponPolicy {
            usage_limit: None,
            usage_count: 1_000_000,
            ..base_coupon()
        };
        assert!(
            coupon
                .discount_for(Decimal::from(600), Utc::now())
                .is_ok()
        );
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        let err = CouponRejection::BelowMinimum {
            minimum: Decimal::from(500),
        };
        assert_eq!(err.to_string(), "Minimum order value is \u{20b9}500");
        assert_eq!(
            CouponRejection::UsageLimitReached.to_string(),
            "Coupon usage limit reached"
        );
    }
}
