//! Admin customer listing.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::{OrderRepository, UserRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::UserProfile;
use crate::state::AppState;

/// A customer account with their order history summarized.
#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub order_count: u64,
    /// Sum of this customer's paid order totals.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_spent: Decimal,
}

/// All customer accounts, newest first, annotated with order counts and
/// paid spend. Password hashes never leave the database.
///
/// # Errors
///
/// Returns a database error when a query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<CustomerSummary>>> {
    let customers = UserRepository::new(state.db()).list_customers().await?;

    let mut order_counts: HashMap<String, u64> = HashMap::new();
    let mut spend: HashMap<String, Decimal> = HashMap::new();
    for order in OrderRepository::new(state.db()).list_all(None).await? {
        *order_counts.entry(order.user_id.clone()).or_default() += 1;
        if order.is_paid() {
            *spend.entry(order.user_id).or_default() += order.total;
        }
    }

    let summaries = customers
        .into_iter()
        .map(|user| CustomerSummary {
            order_count: order_counts.get(&user.id).copied().unwrap_or(0),
            total_spent: spend.get(&user.id).copied().unwrap_or(Decimal::ZERO),
            profile: UserProfile::from(user),
        })
        .collect();
    Ok(Json(summaries))
}
