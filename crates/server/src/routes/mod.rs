//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings MongoDB)
//!
//! # Auth
//! POST /api/auth/register               - Create an account
//! POST /api/auth/login                  - Exchange credentials for a token
//! GET  /api/auth/me                     - Current user profile
//!
//! # Catalog (public)
//! GET  /api/products                    - List products (category/featured filters)
//! GET  /api/products/{id}               - Product detail
//! GET  /api/categories                  - Distinct category names
//!
//! # Storefront (public)
//! POST /api/coupons/validate            - Price a coupon against a subtotal
//! GET  /api/settings/site               - Public site settings
//! GET  /api/payments/config             - Gateway key id and enablement
//! POST /api/contact                     - Submit the contact form
//! POST /api/seed                        - Seed demo data (idempotent)
//!
//! # Orders (requires auth)
//! POST /api/orders                      - Checkout
//! POST /api/orders/{id}/verify-payment  - Confirm a gateway payment
//! GET  /api/orders/mine                 - Current user's orders
//! GET  /api/orders/{id}                 - One of the current user's orders
//!
//! # Admin (requires admin role)
//! GET    /api/admin/dashboard               - Aggregate stats
//! GET    /api/admin/products                 - All products incl. inactive
//! POST   /api/admin/products                 - Create product
//! PUT    /api/admin/products/{id}            - Update product
//! DELETE /api/admin/products/{id}            - Delete product
//! GET    /api/admin/orders                   - All orders (status filter)
//! PUT    /api/admin/orders/{id}/status       - Advance fulfilment status
//! GET    /api/admin/coupons                  - All coupons
//! POST   /api/admin/coupons                  - Create coupon
//! PUT    /api/admin/coupons/{id}             - Update coupon
//! DELETE /api/admin/coupons/{id}             - Delete coupon
//! GET    /api/admin/customers                - All customer accounts
//! GET    /api/admin/inventory                - Per-variant stock report
//! PUT    /api/admin/inventory/{product_id}/{variant_id} - Set variant stock
//! GET    /api/admin/settings/smtp            - Stored SMTP settings (masked)
//! PUT    /api/admin/settings/smtp            - Store SMTP settings
//! POST   /api/admin/settings/smtp/test       - Send a test email
//! GET    /api/admin/settings/payment         - Stored gateway settings (masked)
//! PUT    /api/admin/settings/payment         - Store gateway settings
//! GET    /api/admin/settings/whatsapp        - Stored WhatsApp settings
//! PUT    /api/admin/settings/whatsapp        - Store WhatsApp settings
//! GET    /api/admin/contact-messages         - All contact messages
//! PUT    /api/admin/contact-messages/{id}/read - Mark message read
//! DELETE /api/admin/contact-messages/{id}    - Delete message
//! POST   /api/admin/uploads                  - Upload a product image
//! POST   /api/admin/uploads/fetch            - Localize a remote image URL
//! ```

pub mod admin;
pub mod auth;
pub mod contact;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;
pub mod seed;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

/// Create the public catalog and storefront routes router.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/coupons/validate", post(coupons::validate))
        .route("/settings/site", get(settings::site))
        .route("/payments/config", get(settings::payment_config))
        .route("/contact", post(contact::submit))
        .route("/seed", post(seed::seed))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/mine", get(orders::mine))
        .route("/{id}", get(orders::show))
        .route("/{id}/verify-payment", post(orders::verify_payment))
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
        .nest("/admin", admin::routes())
        .merge(storefront_routes())
}
