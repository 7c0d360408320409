//! Ordering for currency columns.

use std::cmp::Ordering;

use serde_json::Value;

use crate::amount::parse_amount;

/// Compare two amount cells for sorting.
///
/// `"(50)"` sorts as -50 and `"-50"` keeps its sign. Null, empty and
/// non-numeric cells sort before every number and equal each other.
#[must_use]
pub fn compare_amounts(a: &Value, b: &Value) -> Ordering {
    match (parse_amount(a), parse_amount(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// Sort cells ascending with [`compare_amounts`].
pub fn sort_amounts(values: &mut [Value]) {
    values.sort_by(compare_amounts);
}
