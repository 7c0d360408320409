//! Dataset ingestion.
//!
//! Turns the host's serialized dataset into records plus the column
//! definitions the grid is configured with. Column inference only looks at
//! the first record; the rest of the rows are trusted to share its shape.

use serde_json::Value;

use crate::error::{ReconGridError, Result};
use crate::types::{AggFunc, ColumnDef, ColumnKind, Record};

/// Fields displayed and ordered as currency.
pub const CURRENCY_FIELDS: &[&str] = &["Amount", "Difference"];

/// Fields forced to text filtering and formatting.
pub const TEXT_FIELDS: &[&str] = &["ServiceDate"];

/// Column hints supplied next to the dataset as semicolon-separated lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnHints {
    /// Columns that get a `sum` aggregation.
    pub agg_func_columns: Vec<String>,
    /// Columns the user may drag into row groups.
    pub row_group_columns: Vec<String>,
    /// Columns the user may pivot on.
    pub pivot_columns: Vec<String>,
}

impl ColumnHints {
    /// Build hints from the raw host strings.
    #[must_use]
    pub fn from_lists(agg: Option<&str>, row_group: Option<&str>, pivot: Option<&str>) -> Self {
        Self {
            agg_func_columns: split_field_list(agg),
            row_group_columns: split_field_list(row_group),
            pivot_columns: split_field_list(pivot),
        }
    }
}

/// Split a `"A;B; C"` list into trimmed, non-empty names.
#[must_use]
pub fn split_field_list(list: Option<&str>) -> Vec<String> {
    list.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of ingesting one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub columns: Vec<ColumnDef>,
    /// Field shown in the auto-group column (first field of the schema).
    pub auto_group_field: Option<String>,
}

impl Dataset {
    /// True when no schema could be inferred.
    #[must_use]
    pub fn is_empty_schema(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Parse a serialized dataset into records.
///
/// The dataset must be a JSON array of objects.
///
/// # Errors
/// Returns [`ReconGridError::Json`] for malformed JSON and
/// [`ReconGridError::Parse`] when the shape is wrong.
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(input)?;
    let Value::Array(items) = value else {
        return Err(ReconGridError::Parse(
            "dataset must be a JSON array of records".into(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(fields) => Ok(Record::from_map(fields)),
            other => Err(ReconGridError::Parse(format!(
                "record {idx} is not an object: {other}"
            ))),
        })
        .collect()
}

/// Infer column definitions from the first record's field names.
#[must_use]
pub fn infer_columns(records: &[Record], hints: &ColumnHints) -> Vec<ColumnDef> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .field_names()
        .map(|field| {
            let mut col = ColumnDef::new(field);
            if CURRENCY_FIELDS.contains(&field) {
                col.kind = ColumnKind::Currency;
            } else if TEXT_FIELDS.contains(&field) {
                col.kind = ColumnKind::Text;
            }
            if hints.agg_func_columns.iter().any(|f| f == field) {
                col.agg_func = Some(AggFunc::Sum);
            }
            col.enable_row_group = hints.row_group_columns.iter().any(|f| f == field);
            col.enable_pivot = hints.pivot_columns.iter().any(|f| f == field);
            col
        })
        .collect()
}

/// Ingest a dataset, degrading to an empty one on malformed input.
///
/// Never fails: parse errors are logged and replaced with an empty record
/// sequence, which in turn yields an empty schema.
#[must_use]
pub fn ingest(input: Option<&str>, hints: &ColumnHints) -> Dataset {
    let records = match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => Vec::new(),
        Some(text) => match parse_records(text) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error parsing collection data: {e}");
                Vec::new()
            }
        },
    };

    let columns = infer_columns(&records, hints);
    let auto_group_field = columns.first().map(|c| c.field.clone());

    Dataset {
        records,
        columns,
        auto_group_field,
    }
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

    #[test]
    fn test_split_field_list() {
        assert_eq!(split_field_list(Some("Amount; Difference;;")), vec![
            "Amount".to_string(),
            "Difference".to_string()
        ]);
        assert!(split_field_list(None).is_empty());
        assert!(split_field_list(Some("  ")).is_empty());
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(r#"{"FactRecID":"A"}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_records_rejects_scalar_element() {
        let err = parse_records(r#"[{"FactRecID":"A"}, 3]"#).unwrap_err();
        assert!(matches!(err, ReconGridError::Parse(_)));
    }

    #[test]
    fn test_columns_follow_first_record_order() {
        let records = parse_records(r#"[{"Zeta":1,"Alpha":2},{"Other":3}]"#).unwrap();
        let cols = infer_columns(&records, &ColumnHints::default());
        let names: Vec<_> = cols.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
