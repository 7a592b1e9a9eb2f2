//! Checkout and payment verification.
//!
//! Checkout freezes prices into the order, checks stock, counts the coupon
//! redemption, and registers the order with the payment gateway. Stock is
//! decremented only once a signature-verified confirmation lands, behind
//! the same atomic pending-to-paid transition that makes replays no-ops,
//! so a repeated confirmation can never decrement twice.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use seedleaf_core::{OrderTotals, amount_in_paise};

use crate::db::{CouponRepository, OrderRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{CreateOrderRequest, Order, OrderItem, VerifyPaymentRequest};
use crate::services::razorpay::{GatewayCredentials, PaymentError, verify_payment_signature};
use crate::state::AppState;

const MAX_LINE_QUANTITY: u32 = 100;

/// What the checkout page needs to open the gateway widget for an order.
#[derive(Debug, Serialize)]
pub struct PaymentHandle {
    pub key_id: String,
    pub razorpay_order_id: String,
    /// Amount in paise, as the gateway expects.
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub payment: PaymentHandle,
}

/// Price and create an order, returning the gateway handle for payment.
///
/// # Errors
///
/// Returns 400 for an empty cart, unknown items, insufficient stock, or a
/// coupon that does not apply; 503 when payments are disabled.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CheckoutResponse>> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let razorpay = state.settings().razorpay().await?;
    if !razorpay.enabled {
        return Err(AppError::Payment(PaymentError::Disabled));
    }

    let products = ProductRepository::new(state.db());

    // Price every line against the live catalog.
    let mut items = Vec::with_capacity(payload.items.len());
    let mut subtotal = Decimal::ZERO;
    for line in &payload.items {
        if line.quantity == 0 || line.quantity > MAX_LINE_QUANTITY {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for product {}",
                line.product_id
            )));
        }
        let product = products
            .find_by_id(&line.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        let variant = product
            .variant(&line.variant_id)
            .ok_or_else(|| AppError::NotFound("Variant".to_string()))?;
        if variant.stock < i64::from(line.quantity) {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {} ({})",
                product.name, variant.label
            )));
        }

        let line_total = variant.price * Decimal::from(line.quantity);
        subtotal += line_total;
        items.push(OrderItem {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            product_name: product.name.clone(),
            variant_label: variant.label.clone(),
            unit_price: variant.price,
            quantity: line.quantity,
            line_total,
        });
    }

    // Price the coupon against the frozen subtotal.
    let mut discount = Decimal::ZERO;
    let coupon_code = match &payload.coupon_code {
        Some(code) if !code.trim().is_empty() => {
            let coupon = CouponRepository::new(state.db())
                .find_by_code(code)
                .await?
                .ok_or_else(|| AppError::NotFound("Coupon".to_string()))?;
            discount = coupon
                .policy()
                .discount_for(subtotal, Utc::now())
                .map_err(|rejection| AppError::BadRequest(rejection.to_string()))?;
            Some(coupon.code)
        }
        _ => None,
    };

    // Count the redemption under the same cap the validation checked.
    if let Some(code) = &coupon_code {
        let redeemed = CouponRepository::new(state.db()).redeem(code).await?;
        if !redeemed {
            return Err(AppError::BadRequest(
                "Coupon usage limit reached".to_string(),
            ));
        }
    }

    let totals = OrderTotals::compute(subtotal, discount);
    let mut order = Order::new(
        user.user_id,
        user.email,
        items,
        payload.address,
        totals,
        coupon_code,
    );

    let amount = amount_in_paise(totals.total)
        .ok_or_else(|| AppError::Internal("Order total out of range".to_string()))?;
    let credentials = GatewayCredentials {
        key_id: razorpay.key_id.clone(),
        key_secret: state.settings().razorpay_secret().await?,
    };
    let gateway_order = state
        .razorpay()
        .create_order(&credentials, amount, &order.order_number)
        .await?;
    order.razorpay_order_id = Some(gateway_order.id.clone());

    OrderRepository::new(state.db()).insert(&order).await?;
    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        total = %order.total,
        "Order created"
    );

    Ok(Json(CheckoutResponse {
        order,
        payment: PaymentHandle {
            key_id: razorpay.key_id,
            razorpay_order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
        },
    }))
}

/// Confirm a gateway payment against its signature.
///
/// The first verified confirmation marks the order paid, decrements stock,
/// and sends the confirmation email. Replays return the order unchanged
/// with none of those side effects.
///
/// # Errors
///
/// Returns 404 for an order the user does not own, 400 for a signature or
/// order-id mismatch.
pub async fn verify_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<Json<Order>> {
    let orders = OrderRepository::new(state.db());
    let order = orders
        .find_for_user(&id, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    let gateway_order_id = order
        .razorpay_order_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Order has no gateway order".to_string()))?;
    if gateway_order_id != payload.razorpay_order_id {
        return Err(AppError::Payment(PaymentError::OrderMismatch));
    }

    let secret = state.settings().razorpay_secret().await?;
    verify_payment_signature(
        &secret,
        gateway_order_id,
        &payload.razorpay_payment_id,
        &payload.razorpay_signature,
    )?;

    let first_confirmation = orders
        .mark_paid(&order.id, &payload.razorpay_payment_id)
        .await?;

    let order = orders
        .find_by_id(&order.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    if first_confirmation {
        tracing::info!(order_id = %order.id, "Payment verified");
        commit_stock(&ProductRepository::new(state.db()), &order).await;
        let state_for_mail = state.clone();
        let order_for_mail = order.clone();
        tokio::spawn(async move {
            match state_for_mail.settings().smtp().await {
                Ok(smtp) => {
                    if let Err(e) = state_for_mail
                        .mailer()
                        .send_order_confirmation(&smtp, &order_for_mail)
                        .await
                    {
                        tracing::warn!(error = %e, "Order confirmation email failed");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Could not load SMTP settings"),
            }
        });
    } else {
        tracing::info!(order_id = %order.id, "Payment confirmation replayed");
    }

    Ok(Json(order))
}

/// The current user's orders, newest first.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn mine(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.db())
        .list_for_user(&user.user_id)
        .await?;
    Ok(Json(orders))
}

/// One of the current user's orders.
///
/// # Errors
///
/// Returns 404 for an order the user does not own.
pub async fn show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.db())
        .find_for_user(&id, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
    Ok(Json(order))
}

/// Decrement stock for every line of a freshly paid order.
///
/// Runs once per order: the caller only reaches this on the first
/// pending-to-paid transition. A line can still come up short when other
/// orders drained the variant between checkout and confirmation; that is
/// logged for the admin inventory view rather than failing a payment the
/// gateway has already settled.
async fn commit_stock(products: &ProductRepository<'_>, order: &Order) {
    for item in &order.items {
        match products
            .take_stock(&item.product_id, &item.variant_id, i64::from(item.quantity))
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::error!(
                order_id = %order.id,
                product_id = %item.product_id,
                variant_id = %item.variant_id,
                quantity = item.quantity,
                "Paid order exceeds remaining stock"
            ),
            Err(e) => tracing::error!(
                error = %e,
                order_id = %order.id,
                product_id = %item.product_id,
                variant_id = %item.variant_id,
                "Stock decrement failed"
            ),
        }
    }
}
