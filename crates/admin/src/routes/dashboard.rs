//! Dashboard: a quick read on the catalog.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use marigold_core::Product;
use marigold_core::listing::PriceBand;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

const NEWEST_LIMIT: usize = 5;

/// One price-band row on the dashboard.
pub struct BandCount {
    pub label: &'static str,
    pub count: usize,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    product_count: usize,
    newest: Vec<Product>,
    bands: Vec<BandCount>,
}

/// Display the dashboard.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list_all().await?;

    let bands = PriceBand::ALL
        .iter()
        .map(|band| BandCount {
            label: band.label(),
            count: products
                .iter()
                .filter(|product| band.contains(product.price))
                .count(),
        })
        .collect();

    let template = DashboardTemplate {
        product_count: products.len(),
        newest: products.into_iter().take(NEWEST_LIMIT).collect(),
        bands,
    };

    Ok(Html(template.render().unwrap_or_else(|_| {
        String::from("Error rendering template")
    })))
}
