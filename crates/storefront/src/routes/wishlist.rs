//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::{Product, ProductId, Wishlist};

use crate::error::Result;
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::routes::sanitize_return_to;
use crate::state::AppState;

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishlistPageTemplate {
    pub nav: NavBadges,
    pub products: Vec<Product>,
}

/// Display the wishlist page.
///
/// GET /wishlist
///
/// Ids resolve against the catalog in wishlist insertion order; ids whose
/// product has since been deleted are skipped, not errors.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<WishlistPageTemplate> {
    let catalog = state.catalog().list().await?;

    let mut stash = SessionStash::load(&session).await;
    let wishlist = Wishlist::load(&mut stash);
    let products: Vec<Product> = wishlist
        .ids()
        .iter()
        .filter_map(|id| catalog.iter().find(|product| product.id == *id).cloned())
        .collect();
    drop(wishlist);
    let nav = NavBadges::from_stash(&mut stash);

    Ok(WishlistPageTemplate { nav, products })
}

/// Toggle a product id in or out of the wishlist.
///
/// POST /wishlist/toggle
#[instrument(skip(session, form))]
pub async fn toggle(session: Session, axum::Form(form): axum::Form<ToggleForm>) -> Redirect {
    let mut stash = SessionStash::load(&session).await;
    let mut wishlist = Wishlist::load(&mut stash);
    let now_present = wishlist.toggle(ProductId::new(&*form.product_id));
    drop(wishlist);
    stash.flush(&session).await;

    tracing::debug!(product_id = %form.product_id, now_present, "wishlist toggled");
    Redirect::to(&sanitize_return_to(form.return_to.as_deref(), "/wishlist"))
}

/// Badge count fragment, plain text.
///
/// GET /wishlist/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let mut stash = SessionStash::load(&session).await;
    Wishlist::load(&mut stash).len().to_string()
}
