//! JSON API route handlers.
//!
//! Same cookie auth as the HTML routes; the guard rejects `/api/` paths with
//! 401 JSON instead of a login redirect. Products serialize in the public
//! camelCase wire shape.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use marigold_core::{Product, ProductId};

use crate::db::ProductRepository;
use crate::error::{Result, json_error};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List every product as JSON.
///
/// GET /api/products
#[instrument(skip_all)]
pub async fn list_products(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// A single product as JSON; 404 JSON when missing.
///
/// GET /api/products/{id}
#[instrument(skip_all, fields(product_id = %id))]
pub async fn get_product(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool()).get(&id).await?;

    Ok(product.map_or_else(
        || json_error(StatusCode::NOT_FOUND, "product not found"),
        |product| Json(product).into_response(),
    ))
}

/// Confirm the cookie is still good.
///
/// GET /api/auth/me
pub async fn me(RequireAdminAuth(_claims): RequireAdminAuth) -> Json<serde_json::Value> {
    Json(json!({ "authenticated": true }))
}
