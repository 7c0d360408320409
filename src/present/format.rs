//! Locale-stable display formatting for currency columns.
//!
//! Amounts are rounded to cents, grouped by thousands with `,`, and trailing
//! zero decimals are dropped. Negative amounts use accounting parentheses:
//! `-1234.5` → `(1,234.5)`.

use serde_json::Value;

use crate::amount::parse_amount;

/// Format an amount cell for display; non-numeric values render empty.
#[must_use]
pub fn format_amount(value: &Value) -> String {
    match parse_amount(value) {
        Some(n) => format_amount_number(n),
        None => String::new(),
    }
}

/// Format a number the way [`format_amount`] does.
#[must_use]
pub fn format_amount_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut text = group_thousands(int_part);
    if !frac.is_empty() {
        text.push('.');
        text.push_str(frac);
    }

    // Rounds to zero: no parentheses around "0"
    if value < 0.0 && text != "0" {
        format!("({text})")
    } else {
        text
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_tiny_negative_is_zero() {
        assert_eq!(format_amount(&json!(-0.001)), "0");
    }
}
