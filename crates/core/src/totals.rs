//! Shipping fee and order total computation.

use rust_decimal::Decimal;
use serde::Serialize;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Shipping fee for a given subtotal.
#[must_use]
pub fn shipping_fee(subtotal: Decimal) -> Decimal {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// The priced breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute totals from a subtotal and an already-validated discount.
    ///
    /// The discount is clamped to the subtotal so the total can never go
    /// negative. Shipping is decided by the undiscounted subtotal, which
    /// is how the store has always advertised the free-shipping threshold.
    #[must_use]
    pub fn compute(subtotal: Decimal, discount: Decimal) -> Self {
        let discount = discount.min(subtotal).max(Decimal::ZERO);
        let shipping = shipping_fee(subtotal);
        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_free_at_threshold() {
        assert_eq!(shipping_fee(Decimal::from(500)), Decimal::ZERO);
        assert_eq!(shipping_fee(Decimal::from(501)), Decimal::ZERO);
    }

    #[test]
    fn shipping_charged_below_threshold() {
        assert_eq!(shipping_fee(Decimal::from(499)), Decimal::from(50));
        assert_eq!(shipping_fee(Decimal::ZERO), Decimal::from(50));
    }

    #[test]
    fn totals_add_up() {
        let totals = OrderTotals::compute(Decimal::from(600), Decimal::from(120));
        assert_eq!(totals.subtotal, Decimal::from(600));
        assert_eq!(totals.discount, Decimal::from(120));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(480));
    }

    #[test]
    fn shipping_added_to_small_orders() {
        let totals = OrderTotals::compute(Decimal::from(300), Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(350));
    }

    #[test]
    fn discount_clamped_to_subtotal() {
        let totals = OrderTotals::compute(Decimal::from(300), Decimal::from(400));
        assert_eq!(totals.discount, Decimal::from(300));
        // 300 - 300 + 50 shipping
        assert_eq!(totals.total, Decimal::from(50));
    }

    #[test]
    fn negative_discount_treated_as_zero() {
        let totals = OrderTotals::compute(Decimal::from(300), Decimal::from(-10));
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(350));
    }

    #[test]
    fn shipping_decided_by_subtotal_not_discounted_total() {
        // 550 - 100 = 450 after discount, but the subtotal clears the
        // threshold so shipping stays free.
        let totals = OrderTotals::compute(Decimal::from(550), Decimal::from(100));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(450));
    }
}
