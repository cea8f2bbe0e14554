//! Custom Askama template filters.

use std::borrow::Borrow;

use rust_decimal::Decimal;

/// Format a rupee amount with Indian digit grouping.
///
/// Usage in templates: `{{ product.price|inr }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn inr(amount: impl Borrow<Decimal>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(marigold_core::format_inr(*amount.borrow()))
}
