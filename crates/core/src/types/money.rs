//! Rupee formatting helpers.
//!
//! Prices across the shop are `rust_decimal::Decimal` rupee amounts. Display
//! uses Indian digit grouping (lakh/crore style): the last three digits form
//! one group, every group above that has two digits.

use rust_decimal::Decimal;

/// Format a rupee amount with the currency mark and Indian grouping.
///
/// `1234567` formats as `₹12,34,567`. Paise appear only when the amount has
/// a fractional part, so whole rupees never grow a trailing `.00`.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let sign = if normalized.is_sign_negative() { "-" } else { "" };
    let grouped = group_indian(int_part);
    frac_part.map_or_else(
        || format!("{sign}₹{grouped}"),
        |frac| format!("{sign}₹{grouped}.{frac}"),
    )
}

/// Format a rupee amount plainly: normalized digits, no mark, no grouping.
///
/// This is the form interpolated into WhatsApp messages next to a literal
/// `₹`, where grouping would differ from what the shop has always sent.
#[must_use]
pub fn format_plain(amount: Decimal) -> String {
    amount.normalize().to_string()
}

fn group_indian(digits: &str) -> String {
    let count = digits.len();
    if count <= 3 {
        return digits.to_owned();
    }
    let mut out = String::with_capacity(count + count / 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 {
            let remaining = count - i;
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                out.push(',');
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn small_amounts_have_no_grouping() {
        assert_eq!(format_inr(dec("0")), "₹0");
        assert_eq!(format_inr(dec("500")), "₹500");
        assert_eq!(format_inr(dec("999")), "₹999");
    }

    #[test]
    fn groups_last_three_then_pairs() {
        assert_eq!(format_inr(dec("1234")), "₹1,234");
        assert_eq!(format_inr(dec("123456")), "₹1,23,456");
        assert_eq!(format_inr(dec("1234567")), "₹12,34,567");
        assert_eq!(format_inr(dec("123456789")), "₹12,34,56,789");
    }

    #[test]
    fn whole_rupees_drop_trailing_zeroes() {
        assert_eq!(format_inr(dec("1499.00")), "₹1,499");
        assert_eq!(format_inr(dec("1499.50")), "₹1,499.5");
        assert_eq!(format_inr(dec("1499.55")), "₹1,499.55");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_inr(dec("-1234")), "-₹1,234");
    }

    #[test]
    fn plain_form_normalizes_without_grouping() {
        assert_eq!(format_plain(dec("1234567")), "1234567");
        assert_eq!(format_plain(dec("450.00")), "450");
        assert_eq!(format_plain(dec("450.50")), "450.5");
    }
}
