//! The shipped seed file must clear the same validation gate the admin panel
//! and the seeder apply, and it should exercise the whole shop: every
//! category, every price band.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use marigold_admin::models::{ProductForm, ValidProduct};
use marigold_core::CATEGORIES;
use marigold_core::listing::PriceBand;

/// Mirror of the seed file entry shape the CLI reads.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    title: String,
    description: String,
    price: String,
    rating: String,
    category: String,
    sizes: Vec<String>,
    colours: Vec<String>,
    images: Vec<String>,
}

impl SeedEntry {
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

fn shipped_seeds() -> Vec<SeedEntry> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../seeds/products.yaml");
    let content = std::fs::read_to_string(path).unwrap();
    serde_yaml::from_str(&content).unwrap()
}

#[test]
fn every_shipped_seed_entry_validates() {
    let entries = shipped_seeds();
    assert!(!entries.is_empty());

    for entry in &entries {
        let result = entry.to_form().validate();
        assert!(
            result.is_ok(),
            "seed entry {:?} failed validation: {}",
            entry.title,
            result.unwrap_err()
        );
    }
}

#[test]
fn shipped_seeds_span_every_category_and_band() {
    let valid: Vec<ValidProduct> = shipped_seeds()
        .iter()
        .map(|entry| entry.to_form().validate().unwrap())
        .collect();

    let categories: BTreeSet<&str> = valid.iter().map(|p| p.category.as_str()).collect();
    for category in CATEGORIES {
        assert!(categories.contains(category), "no seed for {category}");
    }

    for band in PriceBand::ALL {
        assert!(
            valid.iter().any(|p| band.contains(p.price)),
            "no seed in the {} band",
            band.label()
        );
    }
}

#[test]
fn seed_entries_reject_the_same_things_the_panel_does() {
    let mut entry = shipped_seeds().into_iter().next().unwrap();
    entry.category = "saree".to_owned();
    entry.rating = "5.5".to_owned();
    entry.images.clear();

    let errors = entry.to_form().validate().unwrap_err();
    assert!(errors.field("category").is_some());
    assert!(errors.field("rating").is_some());
    assert!(errors.field("images").is_some());
    assert!(errors.field("title").is_none());
}
