//! Seed the catalog from a YAML file.
//!
//! Entries run through the same validation as the admin panel forms, and the
//! whole file is checked before anything touches the database.

use serde::Deserialize;
use tracing::info;

use super::{CommandError, database_url};
use marigold_admin::db::{self, products::ProductRepository};
use marigold_admin::models::{ProductForm, ValidProduct};

/// One catalog entry as written in the seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    title: String,
    description: String,
    price: String,
    rating: String,
    category: String,
    sizes: Vec<String>,
    colours: Vec<String>,
    images: Vec<String>,
}

impl SeedProduct {
    fn to_form(&self) -> ProductForm {
        ProductForm {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            rating: self.rating.clone(),
            category: self.category.clone(),
            sizes: self.sizes.join(", "),
            colours: self.colours.join(", "),
            images: self.images.clone(),
        }
    }
}

/// Load products from a YAML file.
///
/// # Arguments
///
/// * `file` - path to the YAML seed file
/// * `clear` - if true, truncate the product table first
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry fails
/// validation, or a database operation fails.
pub async fn products(file: &str, clear: bool) -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CommandError::Io {
            path: file.to_string(),
            source,
        })?;
    let entries: Vec<SeedProduct> = serde_yaml::from_str(&content)?;
    info!(path = %file, count = entries.len(), "Parsed seed file");

    // Validate the whole file before connecting
    let mut valid: Vec<ValidProduct> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.to_form().validate() {
            Ok(product) => valid.push(product),
            Err(errors) => {
                return Err(CommandError::InvalidSeed {
                    index,
                    title: entry.title.clone(),
                    errors,
                });
            }
        }
    }

    let url = database_url("ADMIN_DATABASE_URL")?;
    let pool = db::create_pool(&url).await?;
    let repo = ProductRepository::new(&pool);

    if clear {
        repo.clear().await?;
        info!("Cleared existing products");
    }

    for product in &valid {
        let inserted = repo.insert(product).await?;
        info!(id = %inserted.id, title = %inserted.title, "Inserted product");
    }

    info!(inserted = valid.len(), "Seeding complete");
    Ok(())
}
