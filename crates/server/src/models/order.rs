//! Order documents and checkout payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use seedleaf_core::{OrderStatus, OrderTotals, PaymentStatus};

/// A shipping address captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// One cart line in a checkout request, referencing catalog entries by id.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
}

/// Checkout request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<CartLine>,
    pub address: Address,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Payment-confirmation request body. Field names follow the gateway's
/// client SDK callback payload.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// A priced line item frozen into an order at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub variant_id: String,
    pub product_name: String,
    pub variant_label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub line_total: Decimal,
}

/// An order document as stored in the `orders` collection.
///
/// `order_number` is the short human-facing reference printed on emails;
/// `id` is the canonical key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub user_email: String,
    pub items: Vec<OrderItem>,
    pub address: Address,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::rfc3339_micros")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Assemble a new pending order from priced items and totals.
    #[must_use]
    pub fn new(
        user_id: String,
        user_email: String,
        items: Vec<OrderItem>,
        address: Address,
        totals: OrderTotals,
        coupon_code: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            order_number: generate_order_number(now),
            user_id,
            user_email,
            items,
            address,
            subtotal: totals.subtotal,
            discount: totals.discount,
            coupon_code,
            shipping: totals.shipping,
            total: totals.total,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            razorpay_order_id: None,
            razorpay_payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this order has already been paid for.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// Short order reference like `SL-20250823-4F2A`.
fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::random();
    format!("SL-{}-{suffix:04X}", now.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 Garden Lane".to_string(),
            line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        }
    }

    #[test]
    fn new_orders_start_pending() {
        let totals = OrderTotals::compute(Decimal::from(600), Decimal::ZERO);
        let order = Order::new(
            "u1".to_string(),
            "asha@example.com".to_string(),
            vec![],
            sample_address(),
            totals,
            None,
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(!order.is_paid());
        assert!(order.razorpay_order_id.is_none());
    }

    #[test]
    fn order_number_has_date_and_suffix() {
        let now = Utc::now();
        let number = generate_order_number(now);
        assert!(number.starts_with("SL-"));
        let date = now.format("%Y%m%d").to_string();
        assert!(number.contains(&date));
        assert_eq!(number.len(), 3 + 8 + 1 + 4);
    }

    #[test]
    fn timestamps_serialize_with_fixed_width() {
        let totals = OrderTotals::compute(Decimal::from(600), Decimal::ZERO);
        let order = Order::new(
            "u1".to_string(),
            "asha@example.com".to_string(),
            vec![],
            sample_address(),
            totals,
            None,
        );
        let json = serde_json::to_value(&order).unwrap();
        for field in ["created_at", "updated_at"] {
            let raw = json[field].as_str().unwrap();
            // Six fractional digits and a Z suffix, the same shape the
            // mark_paid / update_status raw updates write, so strings in
            // the same second still sort chronologically.
            assert!(raw.ends_with('Z'), "{raw}");
            let fraction = raw.rsplit('.').next().unwrap();
            assert_eq!(fraction.len(), 7, "{raw}");
        }

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(
            back.created_at.timestamp_micros(),
            order.created_at.timestamp_micros()
        );
    }

    #[test]
    fn money_fields_serialize_as_strings() {
        let totals = OrderTotals::compute(Decimal::from(450), Decimal::from(50));
        let order = Order::new(
            "u1".to_string(),
            "asha@example.com".to_string(),
            vec![],
            sample_address(),
            totals,
            Some("FLAT50".to_string()),
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["subtotal"], "450");
        assert_eq!(json["discount"], "50");
        assert_eq!(json["shipping"], "50");
        assert_eq!(json["total"], "450");
        assert_eq!(json["status"], "pending");
    }
}
