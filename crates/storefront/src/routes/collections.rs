//! Collections page: category and price-band tiles linking into /shop.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::CATEGORIES;
use marigold_core::listing::PriceBand;

use crate::error::Result;
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::state::AppState;

/// One tile on the collections page.
pub struct Tile {
    pub label: String,
    pub href: String,
    pub count: usize,
}

/// Collections page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections.html")]
pub struct CollectionsTemplate {
    pub nav: NavBadges,
    pub category_tiles: Vec<Tile>,
    pub band_tiles: Vec<Tile>,
}

/// Display the collections page.
///
/// GET /collections
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<CollectionsTemplate> {
    let catalog = state.catalog().list().await?;

    let category_tiles = CATEGORIES
        .iter()
        .map(|category| Tile {
            label: plural_label(category),
            href: format!("/shop?type={category}"),
            count: catalog
                .iter()
                .filter(|product| product.category == *category)
                .count(),
        })
        .collect();

    let band_tiles = PriceBand::ALL
        .iter()
        .map(|band| Tile {
            label: band.label().to_owned(),
            href: format!("/shop?priceRange={}", band.as_str()),
            count: catalog
                .iter()
                .filter(|product| band.contains(product.price))
                .count(),
        })
        .collect();

    let mut stash = SessionStash::load(&session).await;
    let nav = NavBadges::from_stash(&mut stash);

    Ok(CollectionsTemplate {
        nav,
        category_tiles,
        band_tiles,
    })
}

/// `frock` -> `Frocks`.
fn plural_label(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}s", first.to_uppercase(), chars.as_str())
    })
}
