//! Cached catalog reads.
//!
//! The storefront renders every page from the product list, so reads go
//! through a short-TTL in-process cache instead of hitting Postgres per
//! request. Admin writes land in the database directly; the storefront
//! tolerates at most one TTL of staleness.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use thiserror::Error;

use marigold_core::{Product, ProductId};

use crate::db::{ProductRepository, RepositoryError};

/// Errors from cached catalog reads.
///
/// `moka` shares a failed load between concurrent callers, so the underlying
/// repository error arrives behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("catalog read failed: {0}")]
    Read(#[from] Arc<RepositoryError>),
}

/// Key for the whole-list cache entry. There is only one list.
const LIST_KEY: () = ();

/// Catalog reads with an in-process cache in front of Postgres.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
    list: Cache<(), Arc<Vec<Product>>>,
    by_id: Cache<ProductId, Option<Product>>,
}

impl CatalogService {
    /// Create a catalog service caching reads for `ttl_seconds`.
    #[must_use]
    pub fn new(pool: PgPool, ttl_seconds: u64) -> Self {
        let ttl = Duration::from_secs(ttl_seconds);
        Self {
            pool,
            list: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build(),
            by_id: Cache::builder()
                .max_capacity(1024)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Every product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if the underlying query fails. Failed
    /// loads are not cached, so the next call retries.
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        let pool = self.pool.clone();
        let products = self
            .list
            .try_get_with(LIST_KEY, async move {
                let repository = ProductRepository::new(&pool);
                repository.list_all().await.map(Arc::new)
            })
            .await?;
        Ok(products)
    }

    /// A single product by id. Missing ids cache as `None` for the TTL.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if the underlying query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let pool = self.pool.clone();
        let lookup = id.clone();
        let product = self
            .by_id
            .try_get_with(id.clone(), async move {
                let repository = ProductRepository::new(&pool);
                repository.get(&lookup).await
            })
            .await?;
        Ok(product)
    }

    /// Drop all cached entries. Used by tests and nothing else yet.
    pub fn invalidate(&self) {
        self.list.invalidate_all();
        self.by_id.invalidate_all();
    }
}
