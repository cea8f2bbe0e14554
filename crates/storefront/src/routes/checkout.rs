//! Checkout handoff: redirect into a pre-filled WhatsApp chat.
//!
//! The shop takes no payments. Checkout serializes the cart (or a single
//! product enquiry) into a message and 303s the visitor to `wa.me`; our
//! responsibility ends once the chat opens.

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::{Cart, ProductId, checkout};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::SessionStash;
use crate::state::AppState;

/// Enquiry query parameters: the visitor's size/color selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnquiryQuery {
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Redirect to a WhatsApp chat carrying the whole cart as an order message.
///
/// GET /checkout/whatsapp
///
/// An empty cart has nothing to order and bounces back to the cart page.
#[instrument(skip(state, session))]
pub async fn whatsapp(State(state): State<AppState>, session: Session) -> Redirect {
    let mut stash = SessionStash::load(&session).await;
    let cart = Cart::load(&mut stash);
    if cart.is_empty() {
        return Redirect::to("/cart");
    }

    let message = checkout::order_message(cart.lines(), cart.total());
    let url = checkout::whatsapp_url(&state.config().whatsapp_phone, &message);

    add_breadcrumb(
        "checkout",
        "WhatsApp order handoff",
        Some(&[("lines", &cart.lines().len().to_string())]),
    );
    Redirect::to(&url)
}

/// Redirect to a WhatsApp chat with a single-product enquiry (Buy Now).
///
/// GET /checkout/enquiry/:id
///
/// Missing size/color default to the product's first options, so the link
/// works straight off a listing card too.
#[instrument(skip(state))]
pub async fn enquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EnquiryQuery>,
) -> Result<Redirect> {
    let product_id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let size = query
        .size
        .or_else(|| product.sizes.first().cloned())
        .unwrap_or_else(|| "-".to_owned());
    let color = query
        .color
        .or_else(|| product.colours.first().cloned())
        .unwrap_or_else(|| "-".to_owned());

    let message = checkout::enquiry_message(&product, &size, &color);
    let url = checkout::whatsapp_url(&state.config().whatsapp_phone, &message);
    Ok(Redirect::to(&url))
}
