//! Cart route handlers.
//!
//! Every handler follows the same shape: load the session stash, run the
//! core cart container over it, flush the stash back, redirect. The
//! container owns the semantics; these handlers own HTTP.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::storage::KeyValueStorage;
use marigold_core::{Cart, CartLine, LineId, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::routes::{sanitize_return_to, with_cart_open};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub image: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_str().to_owned(),
            product_id: line.product.id.as_str().to_owned(),
            title: line.product.title.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            subtotal: line.subtotal(),
            image: line.product.cover_image().map(str::to_owned),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    pub count: u32,
}

impl CartView {
    /// Snapshot a cart container for rendering.
    pub fn from_cart<S: KeyValueStorage>(cart: &Cart<S>) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total(),
            count: cart.count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub return_to: Option<String>,
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Bare redirect-target form data (remove, clear).
#[derive(Debug, Deserialize)]
pub struct ReturnToForm {
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartPageTemplate {
    pub nav: NavBadges,
    pub cart: CartView,
}

/// Display the cart page.
///
/// GET /cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> CartPageTemplate {
    let mut stash = SessionStash::load(&session).await;
    let cart = CartView::from_cart(&Cart::load(&mut stash));
    let nav = NavBadges::from_stash(&mut stash);
    CartPageTemplate { nav, cart }
}

/// Add one unit of a product variant.
///
/// POST /cart/items
///
/// The container accepts any size/color; this handler is the trust boundary
/// and checks the selection against the product's declared lists first.
#[instrument(skip(state, session, form))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<AddToCartForm>,
) -> Result<Redirect> {
    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    if !product.sizes.iter().any(|size| *size == form.size) {
        return Err(AppError::BadRequest(format!(
            "size {:?} is not offered for this product",
            form.size
        )));
    }
    if !product.colours.iter().any(|colour| *colour == form.color) {
        return Err(AppError::BadRequest(format!(
            "color {:?} is not offered for this product",
            form.color
        )));
    }

    let mut stash = SessionStash::load(&session).await;
    let mut cart = Cart::load(&mut stash);
    cart.add_line(&product, &form.size, &form.color);
    drop(cart);
    stash.flush(&session).await;

    add_breadcrumb(
        "cart",
        "Added line",
        Some(&[("product_id", product_id.as_str())]),
    );

    let target = sanitize_return_to(form.return_to.as_deref(), "/shop");
    Ok(Redirect::to(&with_cart_open(&target)))
}

/// Set a line's quantity; zero or below removes the line.
///
/// POST /cart/items/:line_id/quantity
#[instrument(skip(session, form))]
pub async fn set_quantity(
    Path(line_id): Path<String>,
    session: Session,
    axum::Form(form): axum::Form<QuantityForm>,
) -> Redirect {
    let mut stash = SessionStash::load(&session).await;
    let mut cart = Cart::load(&mut stash);
    cart.set_quantity(&LineId::new(line_id), form.quantity);
    drop(cart);
    stash.flush(&session).await;

    Redirect::to(&sanitize_return_to(form.return_to.as_deref(), "/cart"))
}

/// Remove a line. Unknown ids are a no-op.
///
/// POST /cart/items/:line_id/remove
#[instrument(skip(session, form))]
pub async fn remove(
    Path(line_id): Path<String>,
    session: Session,
    axum::Form(form): axum::Form<ReturnToForm>,
) -> Redirect {
    let mut stash = SessionStash::load(&session).await;
    let mut cart = Cart::load(&mut stash);
    cart.remove_line(&LineId::new(line_id));
    drop(cart);
    stash.flush(&session).await;

    Redirect::to(&sanitize_return_to(form.return_to.as_deref(), "/cart"))
}

/// Empty the cart.
///
/// POST /cart/clear
#[instrument(skip(session, form))]
pub async fn clear(session: Session, axum::Form(form): axum::Form<ReturnToForm>) -> Redirect {
    let mut stash = SessionStash::load(&session).await;
    let mut cart = Cart::load(&mut stash);
    cart.clear();
    drop(cart);
    stash.flush(&session).await;

    Redirect::to(&sanitize_return_to(form.return_to.as_deref(), "/cart"))
}

/// Badge count fragment, plain text.
///
/// GET /cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let mut stash = SessionStash::load(&session).await;
    Cart::load(&mut stash).count().to_string()
}
