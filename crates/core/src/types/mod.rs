//! Shared type definitions.
//!
//! # Modules
//!
//! - [`money`] - Currency helpers for the payment-gateway boundary
//! - [`status`] - Role and status enums used across collections

mod money;
mod status;

pub use money::amount_in_paise;
pub use status::{DiscountType, OrderStatus, PaymentStatus, UserRole};
