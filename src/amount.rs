//! Amount parsing and fixed-point serialization.
//!
//! Amount cells arrive as JSON numbers or as strings. Strings may carry
//! thousands separators and accounting-style parentheses for negatives:
//! - `150`, `"150"`, `"150.00"` → 150
//! - `"-150"`, `"(150)"` → -150
//! - `"1,234.5"` → 1234.5

use serde_json::Value;

/// Parse a numeric amount from a cell value.
///
/// Returns `None` for null, empty and non-numeric values.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_amount_str(s),
        _ => None,
    }
}

/// Parse a numeric amount from text.
pub fn parse_amount_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    let n = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;

    // "(-5)" is not an accounting negative; reject rather than guess
    if negative && n.is_sign_negative() {
        return None;
    }
    Some(if negative { -n } else { n })
}

/// Serialize an amount with exactly two decimals (`70` → `"70.00"`).
///
/// Negative zero is written as `"0.00"`.
pub fn to_fixed2(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numbers_and_strings() {
        assert_eq!(parse_amount(&json!(150)), Some(150.0));
        assert_eq!(parse_amount(&json!(-40.5)), Some(-40.5));
        assert_eq!(parse_amount(&json!("100")), Some(100.0));
        assert_eq!(parse_amount(&json!(" -40 ")), Some(-40.0));
    }

    #[test]
    fn test_parse_accounting_negative() {
        assert_eq!(parse_amount(&json!("(50)")), Some(-50.0));
        assert_eq!(parse_amount(&json!("(1,234.50)")), Some(-1234.5));
        assert_eq!(parse_amount(&json!("(-5)")), None);
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(parse_amount(&json!("")), None);
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_amount(&Value::Null), None);
        assert_eq!(parse_amount(&json!(true)), None);
        assert_eq!(parse_amount(&json!("NaN")), None);
    }

    #[test]
    fn test_to_fixed2() {
        assert_eq!(to_fixed2(70.0), "70.00");
        assert_eq!(to_fixed2(-130.0), "-130.00");
        assert_eq!(to_fixed2(0.126), "0.13");
        assert_eq!(to_fixed2(-0.0), "0.00");
        assert_eq!(to_fixed2(-0.001), "0.00");
    }
}
