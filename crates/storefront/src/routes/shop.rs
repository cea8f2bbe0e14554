//! Shop listing route handler.
//!
//! Query parameters are parsed leniently: an unknown `priceRange` means no
//! band filter, an unknown `sort` falls back to newest. Bad input never 4xxes
//! a listing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::listing::{self, ListingQuery, PriceBand, SortOrder};
use marigold_core::{CATEGORIES, Cart, Product};

use crate::error::Result;
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Raw listing query parameters as they arrive on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShopQuery {
    /// Category filter (`frock`, `lehenga`, `kurti`).
    #[serde(rename = "type")]
    pub category: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
    /// Price band (`budget`, `mid`, `premium`).
    #[serde(rename = "priceRange")]
    pub price_range: Option<String>,
    /// Sort order (`newest`, `price-asc`, `price-desc`).
    pub sort: Option<String>,
    /// Drawer flag set by the add-to-cart redirect.
    pub cart: Option<String>,
}

impl ShopQuery {
    /// Lower the wire parameters into a core listing query.
    #[must_use]
    pub fn to_listing_query(&self) -> ListingQuery {
        ListingQuery {
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|category| !category.is_empty())
                .map(str::to_owned),
            search: self.q.clone(),
            band: self
                .price_range
                .as_deref()
                .and_then(|band| band.parse::<PriceBand>().ok()),
            sort: self
                .sort
                .as_deref()
                .and_then(|sort| sort.parse::<SortOrder>().ok())
                .unwrap_or_default(),
        }
    }

    /// Whether the add-to-cart redirect asked for the drawer.
    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.cart.as_deref() == Some("open")
    }

    /// The path for this query, used as the `return_to` of the page's forms.
    #[must_use]
    pub fn self_path(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(format!("type={}", urlencoding::encode(category)));
        }
        if let Some(q) = &self.q {
            pairs.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(band) = &self.price_range {
            pairs.push(format!("priceRange={}", urlencoding::encode(band)));
        }
        if let Some(sort) = &self.sort {
            pairs.push(format!("sort={}", urlencoding::encode(sort)));
        }
        if pairs.is_empty() {
            "/shop".to_owned()
        } else {
            format!("/shop?{}", pairs.join("&"))
        }
    }
}

/// One `<option>` in a filter or sort select.
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub nav: NavBadges,
    pub products: Vec<Product>,
    pub q: String,
    pub category_options: Vec<FilterOption>,
    pub band_options: Vec<FilterOption>,
    pub sort_options: Vec<FilterOption>,
    pub return_to: String,
    pub drawer: Option<CartView>,
}

/// Display the shop listing.
///
/// GET /shop
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(raw): Query<ShopQuery>,
) -> Result<ShopTemplate> {
    let catalog = state.catalog().list().await?;
    let query = raw.to_listing_query();
    let products = listing::select(&catalog, &query);

    let mut stash = SessionStash::load(&session).await;
    let drawer = raw
        .drawer_open()
        .then(|| CartView::from_cart(&Cart::load(&mut stash)));
    let nav = NavBadges::from_stash(&mut stash);

    let category_options = CATEGORIES
        .iter()
        .map(|category| FilterOption {
            value: (*category).to_owned(),
            label: (*category).to_owned(),
            selected: query.category.as_deref() == Some(*category),
        })
        .collect();
    let band_options = PriceBand::ALL
        .iter()
        .map(|band| FilterOption {
            value: band.as_str().to_owned(),
            label: band.label().to_owned(),
            selected: query.band == Some(*band),
        })
        .collect();
    let sort_options = SortOrder::ALL
        .iter()
        .map(|sort| FilterOption {
            value: sort.as_str().to_owned(),
            label: sort.label().to_owned(),
            selected: query.sort == *sort,
        })
        .collect();

    Ok(ShopTemplate {
        nav,
        products,
        q: query.search.clone().unwrap_or_default(),
        category_options,
        band_options,
        sort_options,
        return_to: raw.self_path(),
        drawer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_band_and_sort_fall_back_leniently() {
        let raw = ShopQuery {
            price_range: Some("luxury".to_owned()),
            sort: Some("rating".to_owned()),
            ..ShopQuery::default()
        };
        let query = raw.to_listing_query();
        assert_eq!(query.band, None);
        assert_eq!(query.sort, SortOrder::Newest);
    }

    #[test]
    fn blank_category_is_no_filter() {
        let raw = ShopQuery {
            category: Some("  ".to_owned()),
            ..ShopQuery::default()
        };
        assert_eq!(raw.to_listing_query().category, None);
    }

    #[test]
    fn self_path_round_trips_active_filters() {
        let raw = ShopQuery {
            category: Some("kurti".to_owned()),
            price_range: Some("mid".to_owned()),
            sort: Some("price-asc".to_owned()),
            ..ShopQuery::default()
        };
        assert_eq!(raw.self_path(), "/shop?type=kurti&priceRange=mid&sort=price-asc");
        assert_eq!(ShopQuery::default().self_path(), "/shop");
    }

    #[test]
    fn drawer_flag_requires_the_exact_value() {
        let mut raw = ShopQuery {
            cart: Some("open".to_owned()),
            ..ShopQuery::default()
        };
        assert!(raw.drawer_open());
        raw.cart = Some("closed".to_owned());
        assert!(!raw.drawer_open());
    }
}
