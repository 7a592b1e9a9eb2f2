//! Admin order management.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use seedleaf_core::OrderStatus;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// All orders, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns a database error when the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.db())
        .list_all(query.status)
        .await?;
    Ok(Json(orders))
}

/// Advance an order's fulfilment status and notify the customer.
///
/// The notification email is sent in the background.
///
/// # Errors
///
/// Returns 404 for an unknown order.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Order>> {
    let repo = OrderRepository::new(state.db());
    if !repo.update_status(&id, payload.status).await? {
        return Err(AppError::NotFound("Order".to_string()));
    }
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

    let state_for_mail = state.clone();
    let order_for_mail = order.clone();
    tokio::spawn(async move {
        match state_for_mail.settings().smtp().await {
            Ok(smtp) => {
                if let Err(e) = state_for_mail
                    .mailer()
                    .send_order_status(&smtp, &order_for_mail)
                    .await
                {
                    tracing::warn!(error = %e, "Order status email failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not load SMTP settings"),
        }
    });

    Ok(Json(order))
}
