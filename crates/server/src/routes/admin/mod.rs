//! Admin endpoints. Every handler takes the [`RequireAdmin`] extractor.
//!
//! [`RequireAdmin`]: crate::middleware::RequireAdmin

pub mod coupons;
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod messages;
pub mod orders;
pub mod products;
pub mod settings;
pub mod uploads;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the `/api/admin` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::stats))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::destroy),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/coupons", get(coupons::index).post(coupons::create))
        .route(
            "/coupons/{id}",
            put(coupons::update).delete(coupons::destroy),
        )
        .route("/customers", get(customers::index))
        .route("/inventory", get(inventory::index))
        .route(
            "/inventory/{product_id}/{variant_id}",
            put(inventory::set_stock),
        )
        .route(
            "/settings/smtp",
            get(settings::get_smtp).put(settings::put_smtp),
        )
        .route("/settings/smtp/test", post(settings::test_smtp))
        .route(
            "/settings/payment",
            get(settings::get_payment).put(settings::put_payment),
        )
        .route(
            "/settings/whatsapp",
            get(settings::get_whatsapp).put(settings::put_whatsapp),
        )
        .route("/contact-messages", get(messages::index))
        .route("/contact-messages/{id}/read", put(messages::mark_read))
        .route("/contact-messages/{id}", delete(messages::destroy))
        .route("/uploads", post(uploads::upload))
        .route("/uploads/fetch", post(uploads::fetch_remote))
}
