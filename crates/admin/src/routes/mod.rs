//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /ready                   - Readiness check (SELECT 1)
//!
//! # Auth (shared password, signed token cookie)
//! GET  /auth/login              - Login form (authed admins bounce to /)
//! POST /auth/login              - Verify password, set cookie (rate-limited)
//! POST /auth/logout             - Clear cookie
//!
//! # Dashboard
//! GET  /                        - Product count, newest products, band breakdown
//!
//! # Products
//! GET  /products                - Product table
//! GET  /products/new            - Create form
//! POST /products                - Multipart create (fields + image files)
//! GET  /products/{id}/edit      - Edit form
//! POST /products/{id}           - Multipart update
//! POST /products/{id}/delete    - Delete
//!
//! # JSON API (same cookie, 401 JSON on failure)
//! GET  /api/products            - Product list, camelCase wire shape
//! GET  /api/products/{id}       - Single product; 404 JSON when missing
//! GET  /api/auth/me             - { "authenticated": true } with a valid cookie
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the complete admin route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .route("/", get(dashboard::index))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{id}/edit", get(products::edit_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/delete", post(products::delete))
        .route("/api/products", get(api::list_products))
        .route("/api/products/{id}", get(api::get_product))
        .route("/api/auth/me", get(api::me))
}
