//! External service clients for the storefront.

pub mod catalog;

pub use catalog::{CatalogError, CatalogService};
