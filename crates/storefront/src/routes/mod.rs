//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Home page
//! GET  /health                            - Liveness check
//! GET  /ready                             - Readiness check (database ping)
//!
//! # Catalog
//! GET  /shop                              - Listing (type, q, priceRange, sort)
//! GET  /products/:id                      - Product detail
//! GET  /collections                       - Category and price-band tiles
//!
//! # Cart
//! GET  /cart                              - Cart page
//! POST /cart/items                        - Add a line, redirect back with the drawer open
//! POST /cart/items/:line_id/quantity      - Set quantity (<= 0 removes), redirect
//! POST /cart/items/:line_id/remove        - Remove a line, redirect
//! POST /cart/clear                        - Clear the cart, redirect
//! GET  /cart/count                        - Badge count fragment (plain text)
//!
//! # Wishlist
//! GET  /wishlist                          - Wishlist page
//! POST /wishlist/toggle                   - Toggle a product id, redirect back
//! GET  /wishlist/count                    - Badge count fragment (plain text)
//!
//! # Checkout (WhatsApp handoff)
//! GET  /checkout/whatsapp                 - 303 to the wa.me order chat
//! GET  /checkout/enquiry/:id              - 303 to the wa.me single-product enquiry
//! ```
//!
//! Form posts follow Post/Redirect/Get. The redirect target comes from a
//! `return_to` field sanitized by [`sanitize_return_to`].

pub mod cart;
pub mod checkout;
pub mod collections;
pub mod home;
pub mod products;
pub mod shop;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{line_id}/quantity", post(cart::set_quantity))
        .route("/items/{line_id}/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/count", get(wishlist::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/whatsapp", get(checkout::whatsapp))
        .route("/enquiry/{id}", get(checkout::enquiry))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(shop::index))
        .route("/products/{id}", get(products::show))
        .route("/collections", get(collections::index))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/checkout", checkout_routes())
}

/// Sanitize a form-supplied redirect target to a same-site path.
///
/// Anything that is not a plain absolute path (`/...`) falls back: redirects
/// must never leave the site, and `//host` or `scheme://` forms would.
#[must_use]
pub fn sanitize_return_to(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.contains("..") =>
        {
            path.to_owned()
        }
        _ => fallback.to_owned(),
    }
}

/// Append the drawer-open flag to a path that may already carry a query.
#[must_use]
pub fn with_cart_open(path: &str) -> String {
    if path.contains('?') {
        format!("{path}&cart=open")
    } else {
        format!("{path}?cart=open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_to_accepts_plain_paths() {
        assert_eq!(
            sanitize_return_to(Some("/shop?type=kurti"), "/"),
            "/shop?type=kurti"
        );
        assert_eq!(sanitize_return_to(Some("/products/p1"), "/"), "/products/p1");
    }

    #[test]
    fn return_to_rejects_offsite_targets() {
        assert_eq!(sanitize_return_to(Some("https://evil.example"), "/"), "/");
        assert_eq!(sanitize_return_to(Some("//evil.example"), "/"), "/");
        assert_eq!(sanitize_return_to(Some("javascript:alert(1)"), "/"), "/");
        assert_eq!(sanitize_return_to(Some("/a/../secret"), "/"), "/");
        assert_eq!(sanitize_return_to(Some(r"/a\b"), "/"), "/");
        assert_eq!(sanitize_return_to(Some(""), "/cart"), "/cart");
        assert_eq!(sanitize_return_to(None, "/cart"), "/cart");
    }

    #[test]
    fn cart_open_flag_respects_existing_queries() {
        assert_eq!(with_cart_open("/shop"), "/shop?cart=open");
        assert_eq!(with_cart_open("/shop?type=frock"), "/shop?type=frock&cart=open");
    }
}
