//! Database migration commands.
//!
//! The catalog migration lives in `crates/admin/migrations/` and creates the
//! `product` table. The session schema is owned by the tower-sessions store,
//! so `sessions` delegates to its own migrator.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - connection string for the catalog migration
//! - `STOREFRONT_DATABASE_URL` - connection string for the session schema
//! - `DATABASE_URL` - fallback for either when the specific one is unset

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use super::{CommandError, database_url};
use marigold_admin::db;

/// Create the product table.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the migration fails.
pub async fn catalog() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let url = database_url("ADMIN_DATABASE_URL")?;
    let pool = db::create_pool(&url).await?;

    info!("Running catalog migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    info!("Catalog migrations complete");
    Ok(())
}

/// Create the tower-sessions store schema.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the store migration
/// fails.
pub async fn sessions() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let url = database_url("STOREFRONT_DATABASE_URL")?;
    let pool = db::create_pool(&url).await?;

    info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    info!("Session store migration complete");
    Ok(())
}
