//! Product CRUD route handlers.
//!
//! Create and update are multipart posts: text fields plus image files.
//! Files upload to the image host first; the hosted URLs join any retained
//! `existing_images` hidden fields before validation runs.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use marigold_core::{CATEGORIES, Product, ProductId};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{ProductForm, ValidationErrors};
use crate::state::AppState;

/// Product table template.
#[derive(Template)]
#[template(path = "products/list.html")]
struct ProductListTemplate {
    products: Vec<Product>,
}

/// One option in the category select.
struct CategoryOption {
    value: &'static str,
    selected: bool,
}

/// Create/edit form template. Reused for fresh forms, prefilled edits, and
/// 422 re-renders with field errors.
#[derive(Template)]
#[template(path = "products/form.html")]
struct ProductFormTemplate {
    heading: &'static str,
    action: String,
    form: ProductForm,
    errors: ValidationErrors,
    categories: Vec<CategoryOption>,
}

impl ProductFormTemplate {
    fn create(form: ProductForm, errors: ValidationErrors) -> Self {
        let categories = category_options(&form.category);
        Self {
            heading: "New product",
            action: "/products".to_string(),
            form,
            errors,
            categories,
        }
    }

    fn edit(id: &ProductId, form: ProductForm, errors: ValidationErrors) -> Self {
        let categories = category_options(&form.category);
        Self {
            heading: "Edit product",
            action: format!("/products/{}", id.as_str()),
            form,
            errors,
            categories,
        }
    }
}

fn category_options(current: &str) -> Vec<CategoryOption> {
    CATEGORIES
        .iter()
        .map(|category| CategoryOption {
            value: category,
            selected: *category == current,
        })
        .collect()
}

/// List every product.
///
/// GET /products
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(render(&ProductListTemplate { products }))
}

/// Render an empty create form.
///
/// GET /products/new
pub async fn new_form(RequireAdminAuth(_claims): RequireAdminAuth) -> Html<String> {
    render(&ProductFormTemplate::create(
        ProductForm::default(),
        ValidationErrors::default(),
    ))
}

/// Create a product from a multipart form.
///
/// POST /products
#[instrument(skip_all)]
pub async fn create(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(&state, multipart).await?;

    match form.validate() {
        Ok(valid) => {
            let product = ProductRepository::new(state.pool()).insert(&valid).await?;
            tracing::info!(product_id = %product.id, title = %product.title, "product created");
            Ok(Redirect::to("/products").into_response())
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render(&ProductFormTemplate::create(form, errors)),
        )
            .into_response()),
    }
}

/// Render the edit form prefilled with the stored product.
///
/// GET /products/{id}/edit
#[instrument(skip_all, fields(product_id = %id))]
pub async fn edit_form(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(render(&ProductFormTemplate::edit(
        &id,
        form_from_product(&product),
        ValidationErrors::default(),
    )))
}

/// Update a product from a multipart form.
///
/// POST /products/{id}
#[instrument(skip_all, fields(product_id = %id))]
pub async fn update(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let id = ProductId::new(id);
    let form = read_form(&state, multipart).await?;

    match form.validate() {
        Ok(valid) => {
            let repo = ProductRepository::new(state.pool());
            match repo.update(&id, &valid).await {
                Ok(product) => {
                    tracing::info!(product_id = %product.id, "product updated");
                    Ok(Redirect::to("/products").into_response())
                }
                Err(RepositoryError::NotFound) => {
                    Err(AppError::NotFound(format!("product {id}")))
                }
                Err(e) => Err(e.into()),
            }
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render(&ProductFormTemplate::edit(&id, form, errors)),
        )
            .into_response()),
    }
}

/// Delete a product.
///
/// POST /products/{id}/delete
#[instrument(skip_all, fields(product_id = %id))]
pub async fn delete(
    RequireAdminAuth(_claims): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    match ProductRepository::new(state.pool()).delete(&id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "product deleted");
            Ok(Redirect::to("/products"))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("product {id}"))),
        Err(e) => Err(e.into()),
    }
}

/// Drain a multipart body into a `ProductForm`, uploading image files as
/// they stream past. Retained URLs arrive as `existing_images` hidden
/// fields; fresh files as `images` file fields. Empty file parts (the
/// browser sends one when no file is picked) are skipped.
async fn read_form(state: &AppState, mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await?,
            "description" => form.description = field.text().await?,
            "price" => form.price = field.text().await?,
            "rating" => form.rating = field.text().await?,
            "category" => form.category = field.text().await?,
            "sizes" => form.sizes = field.text().await?,
            "colours" => form.colours = field.text().await?,
            "existing_images" => form.images.push(field.text().await?),
            "images" => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.jpg")
                    .to_string();
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    continue;
                }
                let url = state.images().upload(&filename, bytes.to_vec()).await?;
                tracing::debug!(filename = %filename, url = %url, "image uploaded");
                form.images.push(url);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Prefill the form from a stored product for editing.
fn form_from_product(product: &Product) -> ProductForm {
    ProductForm {
        title: product.title.clone(),
        description: product.description.clone(),
        price: product.price.to_string(),
        rating: product.rating.to_string(),
        category: product.category.clone(),
        sizes: product.sizes.join(", "),
        colours: product.colours.join(", "),
        images: product.images.clone(),
    }
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|_| String::from("Error rendering template")),
    )
}
