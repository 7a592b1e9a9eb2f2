//! Seedleaf Core - Shared types and pure pricing logic.
//!
//! This crate provides the types and calculations shared by the server
//! and the integration tests:
//!
//! - [`types`] - Roles, statuses, discount kinds, money helpers
//! - [`coupon`] - Coupon validity and discount computation
//! - [`totals`] - Shipping fee and order total computation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything here is deterministic
//! given its inputs, which is what makes the checkout math testable
//! without a running store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod coupon;
pub mod totals;
pub mod types;

pub use coupon::{CouponPolicy, CouponRejection};
pub use totals::{OrderTotals, shipping_fee};
pub use types::{DiscountType, OrderStatus, PaymentStatus, UserRole, amount_in_paise};
