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

/// Returns the current year.
///
/// Usage in templates: `{{ ""|year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn year(_value: impl std::fmt::Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
