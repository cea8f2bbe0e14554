//! CLI command implementations.

pub mod migrate;
pub mod seed;

use marigold_admin::db::RepositoryError;
use marigold_admin::models::ValidationErrors;
use secrecy::SecretString;

/// Failures shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("seed entry {index} ({title}): {errors}")]
    InvalidSeed {
        index: usize,
        title: String,
        errors: ValidationErrors,
    },

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Resolve a service database URL, falling back to the shared `DATABASE_URL`.
fn database_url(primary_key: &'static str) -> Result<SecretString, CommandError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar(primary_key))
}
