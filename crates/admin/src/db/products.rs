//! Catalog repository: the write side of the `product` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use marigold_core::{Product, ProductId};

use super::RepositoryError;
use crate::models::ValidProduct;

/// One `product` row as stored in Postgres.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    title: String,
    description: String,
    price: Decimal,
    rating: Decimal,
    category: String,
    sizes: Vec<String>,
    colours: Vec<String>,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            rating: row.rating,
            category: row.category,
            sizes: row.sizes,
            colours: row.colours,
            images: row.images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for catalog reads and writes.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every product, newest first, id tie-break for stable order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price, rating, category,
                   sizes, colours, images, created_at, updated_at
            FROM product
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price, rating, category,
                   sizes, colours, images, created_at, updated_at
            FROM product
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Insert a new product under a fresh UUID id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, input: &ValidProduct) -> Result<Product, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO product
                (id, title, description, price, rating, category,
                 sizes, colours, images, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now(), now())
            RETURNING id, title, description, price, rating, category,
                      sizes, colours, images, created_at, updated_at
            ",
        )
        .bind(&id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.rating)
        .bind(&input.category)
        .bind(&input.sizes)
        .bind(&input.colours)
        .bind(&input.images)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an existing product; `updated_at` bumps, `created_at` stays.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the given id, or
    /// `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: &ProductId,
        input: &ValidProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE product
            SET title = $2, description = $3, price = $4, rating = $5,
                category = $6, sizes = $7, colours = $8, images = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, price, rating, category,
                      sizes, colours, images, created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.rating)
        .bind(&input.category)
        .bind(&input.sizes)
        .bind(&input.colours)
        .bind(&input.images)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the given id, or
    /// `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove every product. Used by `seed products --clear`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the truncate fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("TRUNCATE product").execute(self.pool).await?;
        Ok(())
    }
}
