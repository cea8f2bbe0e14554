//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::{Cart, Product, ProductId, Wishlist};

use crate::error::Result;
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Detail page query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailQuery {
    /// Drawer flag set by the add-to-cart redirect.
    pub cart: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub nav: NavBadges,
    pub product: Product,
    pub wishlisted: bool,
    pub return_to: String,
    pub drawer: Option<CartView>,
}

/// Not-found page template, shared with the router fallback.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub nav: NavBadges,
}

/// Display a product detail page.
///
/// GET /products/:id
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Response> {
    let product_id = ProductId::new(id);
    let product = state.catalog().get(&product_id).await?;

    let mut stash = SessionStash::load(&session).await;

    let Some(product) = product else {
        let nav = NavBadges::from_stash(&mut stash);
        return Ok((StatusCode::NOT_FOUND, NotFoundTemplate { nav }).into_response());
    };

    let wishlisted = Wishlist::load(&mut stash).contains(&product_id);
    let drawer = (query.cart.as_deref() == Some("open"))
        .then(|| CartView::from_cart(&Cart::load(&mut stash)));
    let nav = NavBadges::from_stash(&mut stash);

    let return_to = format!("/products/{product_id}");
    Ok(ProductTemplate {
        nav,
        product,
        wishlisted,
        return_to,
        drawer,
    }
    .into_response())
}

/// Router fallback: render the 404 page with live badge counts.
#[instrument(skip(session))]
pub async fn not_found(session: Session) -> Response {
    let mut stash = SessionStash::load(&session).await;
    let nav = NavBadges::from_stash(&mut stash);
    (StatusCode::NOT_FOUND, NotFoundTemplate { nav }).into_response()
}
