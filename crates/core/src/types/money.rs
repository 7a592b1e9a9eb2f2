//! Currency helpers.
//!
//! Amounts are `rust_decimal::Decimal` rupees everywhere inside the
//! application. The payment gateway is the one place that wants integer
//! paise, so the conversion lives here rather than leaking into handlers.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Convert a rupee amount to integer paise for the payment gateway.
///
/// The amount is rounded to two decimal places first (bankers' rounding),
/// matching how the gateway itself quantizes charges. Returns `None` for
/// negative amounts or amounts too large for an `i64`.
#[must_use]
pub fn amount_in_paise(amount: Decimal) -> Option<i64> {
    if amount.is_sign_negative() {
        return None;
    }
    (amount.round_dp(2) * Decimal::from(100)).to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_rupees() {
        assert_eq!(amount_in_paise(Decimal::from(450)), Some(45_000));
    }

    #[test]
    fn fractional_rupees_round() {
        let amount: Decimal = "99.995".parse().unwrap();
        // 99.995 -> 100.00 under round-half-even
        assert_eq!(amount_in_paise(amount), Some(10_000));
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(amount_in_paise(Decimal::ZERO), Some(0));
    }

    #[test]
    fn negative_rejected() {
        assert_eq!(amount_in_paise(Decimal::from(-1)), None);
    }
}
