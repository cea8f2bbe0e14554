//! Shared fixtures for the end-to-end flow tests.
//!
//! The flows run entirely in memory: [`marigold_core::storage::MemoryStorage`]
//! stands in for the web session, the catalog is a plain slice, and the admin
//! pieces are exercised through their library APIs. No network, no database.

use chrono::{DateTime, Utc};

use marigold_core::{Product, ProductId};

/// Build a catalog product with sensible defaults for everything a flow does
/// not care about.
#[must_use]
pub fn product(id: &str, title: &str, category: &str, price: &str, created: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        description: format!("{title} in handloom cotton"),
        price: price.parse().unwrap_or_default(),
        rating: "4.2".parse().unwrap_or_default(),
        category: category.to_owned(),
        sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned()],
        colours: vec!["Rose".to_owned(), "Teal".to_owned()],
        images: vec![format!("https://img.example/{id}.jpg")],
        created_at: created.parse::<DateTime<Utc>>().unwrap_or_default(),
        updated_at: created.parse::<DateTime<Utc>>().unwrap_or_default(),
    }
}

/// A small catalog spanning every category and price band.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product("p1", "Sunset Frock", "frock", "449", "2024-01-01T00:00:00Z"),
        product("p2", "Meadow Frock", "frock", "849", "2024-01-02T00:00:00Z"),
        product("p3", "Everyday Lehenga", "lehenga", "499", "2024-01-03T00:00:00Z"),
        product("p4", "Bridal Lehenga", "lehenga", "4999", "2024-01-04T00:00:00Z"),
        product("p5", "Mulmul Kurti", "kurti", "399", "2024-01-05T00:00:00Z"),
        product("p6", "Silk Kurti", "kurti", "1299", "2024-01-06T00:00:00Z"),
    ]
}
