//! Row style rules keyed on the identifier tag.

use std::collections::BTreeMap;

use crate::types::{IdTag, RecordId};

/// CSS class for rows split off another row.
pub const NEW_ROW_CLASS: &str = "row-new";
/// CSS class for rows edited this session.
pub const UPDATED_ROW_CLASS: &str = "row-updated";

/// Class for a row given its identifier; Original rows get none.
#[must_use]
pub fn row_class(id: &str) -> Option<&'static str> {
    match RecordId::parse(id).tag() {
        IdTag::Original => None,
        IdTag::New => Some(NEW_ROW_CLASS),
        IdTag::Updated => Some(UPDATED_ROW_CLASS),
    }
}

/// `rowClassRules` for the grid: class name to a predicate expression.
///
/// The grid evaluates string rules against `data`; the expressions test the
/// same prefixes [`RecordId::parse`] recognizes.
#[must_use]
pub fn row_class_rules(identity_field: &str) -> BTreeMap<&'static str, String> {
    let mut rules = BTreeMap::new();
    rules.insert(
        NEW_ROW_CLASS,
        format!("data && /^New-\\d+-./.test(String(data['{identity_field}']))"),
    );
    rules.insert(
        UPDATED_ROW_CLASS,
        format!("data && /^Updated-\\d+-./.test(String(data['{identity_field}']))"),
    );
    rules
}
