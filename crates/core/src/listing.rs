//! Catalog listing pipeline.
//!
//! Filters apply in a fixed order (category, search, price band), then one
//! sort runs over whatever survived. The pipeline is a pure function so the
//! shop page, collection tiles, and tests all share it.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Inclusive rupee price bands used by shop filters and offer tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    Budget,
    Mid,
    Premium,
}

impl PriceBand {
    pub const ALL: [Self; 3] = [Self::Budget, Self::Mid, Self::Premium];

    /// Whether a price falls inside the band. Both ends are inclusive.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        match self {
            Self::Budget => price >= Decimal::ZERO && price <= Decimal::from(500_u32),
            Self::Mid => price >= Decimal::from(501_u32) && price <= Decimal::from(1000_u32),
            Self::Premium => price >= Decimal::from(1001_u32),
        }
    }

    /// Wire name, as used in query strings and seed files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Mid => "mid",
            Self::Premium => "premium",
        }
    }

    /// Human label for tiles and form options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "Under ₹500",
            Self::Mid => "₹501 to ₹1,000",
            Self::Premium => "₹1,001 and above",
        }
    }
}

/// Error for unrecognized band names.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown price band: {0}")]
pub struct ParsePriceBandError(String);

impl FromStr for PriceBand {
    type Err = ParsePriceBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget" => Ok(Self::Budget),
            "mid" => Ok(Self::Mid),
            "premium" => Ok(Self::Premium),
            other => Err(ParsePriceBandError(other.to_owned())),
        }
    }
}

/// Orderings a listing can be served in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub const ALL: [Self; 3] = [Self::Newest, Self::PriceAsc, Self::PriceDesc];

    /// Wire name, as used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::PriceAsc => "Price, low to high",
            Self::PriceDesc => "Price, high to low",
        }
    }
}

/// Error for unrecognized sort names.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(ParseSortOrderError(other.to_owned())),
        }
    }
}

/// Filter and sort selection for one listing render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub band: Option<PriceBand>,
    pub sort: SortOrder,
}

/// Run the pipeline over a product slice.
///
/// The search term matches case-insensitively inside title or description;
/// terms that are blank after trimming are ignored. `newest` breaks
/// created-at ties on descending id, so equal timestamps still order
/// deterministically. The price sorts are stable: equal prices keep their
/// incoming relative order.
#[must_use]
pub fn select(products: &[Product], query: &ListingQuery) -> Vec<Product> {
    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let mut selected: Vec<Product> = products
        .iter()
        .filter(|product| {
            query
                .category
                .as_deref()
                .is_none_or(|category| product.category == category)
        })
        .filter(|product| {
            term.as_deref().is_none_or(|term| {
                product.title.to_lowercase().contains(term)
                    || product.description.to_lowercase().contains(term)
            })
        })
        .filter(|product| query.band.is_none_or(|band| band.contains(product.price)))
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Newest => selected.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        }),
        SortOrder::PriceAsc => selected.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => selected.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    selected
}
