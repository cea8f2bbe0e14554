//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::listing::{self, ListingQuery};
use marigold_core::{CATEGORIES, Product};

use crate::error::Result;
use crate::filters;
use crate::models::{NavBadges, SessionStash};
use crate::state::AppState;

/// Number of products shown in the new-arrivals strip.
const NEW_ARRIVALS: usize = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavBadges,
    pub new_arrivals: Vec<Product>,
    pub categories: [&'static str; 3],
}

/// Display the home page.
///
/// GET /
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let catalog = state.catalog().list().await?;
    let mut new_arrivals = listing::select(&catalog, &ListingQuery::default());
    new_arrivals.truncate(NEW_ARRIVALS);

    let mut stash = SessionStash::load(&session).await;
    let nav = NavBadges::from_stash(&mut stash);

    Ok(HomeTemplate {
        nav,
        new_arrivals,
        categories: CATEGORIES,
    })
}
