//! Admin dashboard aggregation.

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use serde::Serialize;

use seedleaf_core::OrderStatus;

use crate::db::{
    ContactRepository, OrderRepository, ProductFilter, ProductRepository, UserRepository,
};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

const RECENT_ORDER_COUNT: i64 = 5;
const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Serialize)]
pub struct OrdersByStatus {
    pub pending: u64,
    pub confirmed: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub orders_by_status: OrdersByStatus,
    /// Sum of paid order totals.
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    pub total_customers: u64,
    pub active_products: u64,
    /// Variants below the low-stock threshold.
    pub low_stock_count: usize,
    pub unread_messages: u64,
    pub recent_orders: Vec<Order>,
}

/// Aggregate store stats for the admin landing page.
///
/// # Errors
///
/// Returns a database error when any query fails.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<DashboardStats>> {
    let orders = OrderRepository::new(state.db());
    let products = ProductRepository::new(state.db());

    let revenue = orders
        .list_paid()
        .await?
        .iter()
        .map(|order| order.total)
        .sum();

    let low_stock_count = products
        .list(&ProductFilter::default())
        .await?
        .iter()
        .flat_map(|product| &product.variants)
        .filter(|variant| variant.stock < LOW_STOCK_THRESHOLD)
        .count();

    let stats = DashboardStats {
        total_orders: orders.count(None).await?,
        orders_by_status: OrdersByStatus {
            pending: orders.count(Some(OrderStatus::Pending)).await?,
            confirmed: orders.count(Some(OrderStatus::Confirmed)).await?,
            shipped: orders.count(Some(OrderStatus::Shipped)).await?,
            delivered: orders.count(Some(OrderStatus::Delivered)).await?,
            cancelled: orders.count(Some(OrderStatus::Cancelled)).await?,
        },
        revenue,
        total_customers: UserRepository::new(state.db()).count_customers().await?,
        active_products: products.count_active().await?,
        low_stock_count,
        unread_messages: ContactRepository::new(state.db()).count_unread().await?,
        recent_orders: orders.recent(RECENT_ORDER_COUNT).await?,
    };
    Ok(Json(stats))
}
