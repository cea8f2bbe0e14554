//! Catalog documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Categories the shop sells. Seeds and admin forms validate against this
/// list; the catalog column itself stays free-form text.
pub const CATEGORIES: [&str; 3] = ["frock", "lehenga", "kurti"];

/// A catalog product as served to pages and the JSON API.
///
/// The wire format is camelCase because the shop's seed files and API
/// consumers predate this service and already speak that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Rupees, exact decimal.
    pub price: Decimal,
    /// Star rating, 0 to 5.
    pub rating: Decimal,
    pub category: String,
    pub sizes: Vec<String>,
    pub colours: Vec<String>,
    /// Hosted image URLs; the first is the cover.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The cover image URL, when the product has any images at all.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_camel_case() {
        let product = Product {
            id: ProductId::new("p1"),
            title: "Marigold Anarkali".to_owned(),
            description: "Festive kurti".to_owned(),
            price: "1499.50".parse().unwrap(),
            rating: "4.5".parse().unwrap(),
            category: "kurti".to_owned(),
            sizes: vec!["M".to_owned()],
            colours: vec!["Rose".to_owned()],
            images: vec!["https://img.example/p1.jpg".to_owned()],
            created_at: "2024-03-01T10:00:00Z".parse().unwrap(),
            updated_at: "2024-03-02T10:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["createdAt"], "2024-03-01T10:00:00Z");
        assert_eq!(json["updatedAt"], "2024-03-02T10:00:00Z");
        assert_eq!(json["price"], "1499.50");
        assert!(json.get("created_at").is_none());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn cover_image_is_the_first_url() {
        let mut product = Product {
            id: ProductId::new("p1"),
            title: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            rating: Decimal::ZERO,
            category: "frock".to_owned(),
            sizes: vec![],
            colours: vec![],
            images: vec!["a.jpg".to_owned(), "b.jpg".to_owned()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.cover_image(), Some("a.jpg"));
        product.images.clear();
        assert_eq!(product.cover_image(), None);
    }
}
