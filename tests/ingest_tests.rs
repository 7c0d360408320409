//! Tests for dataset ingestion and column inference.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use recon_grid::ingest::{ingest, parse_records, ColumnHints};
use recon_grid::types::{AggFunc, ColumnKind, FilterKind};
use test_case::test_case;

const DATASET: &str = r#"[
    {"FactRecID":"8edc","ServiceDate":"2024-03-01","Amount":"100","Difference":-5,"Comments":null},
    {"FactRecID":"91aa","ServiceDate":"2024-03-02","Amount":"-40","Difference":0,"Comments":"ok"}
]"#;

fn hints(agg: &str) -> ColumnHints {
    ColumnHints::from_lists(Some(agg), None, None)
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_ingest_records_in_order() {
    let dataset = ingest(Some(DATASET), &ColumnHints::default());
    assert_eq!(common::ids(&dataset.records), vec!["8edc", "91aa"]);
    assert_eq!(common::amounts(&dataset.records), vec!["100", "-40"]);
}

#[test_case("not json" ; "malformed")]
#[test_case(r#"{"FactRecID":"A"}"# ; "object instead of array")]
#[test_case(r#"[1, 2]"# ; "scalar elements")]
#[test_case(r#"[{"FactRecID":"A"}"# ; "truncated")]
fn test_malformed_degrades_to_empty(input: &str) {
    assert!(parse_records(input).is_err());

    let dataset = ingest(Some(input), &hints("Amount"));
    assert!(dataset.records.is_empty());
    assert!(dataset.is_empty_schema());
    assert_eq!(dataset.auto_group_field, None);
}

#[test_case(None ; "absent")]
#[test_case(Some("") ; "empty")]
#[test_case(Some("   ") ; "blank")]
#[test_case(Some("[]") ; "empty array")]
fn test_no_data_is_empty_schema(input: Option<&str>) {
    let dataset = ingest(input, &ColumnHints::default());
    assert!(dataset.records.is_empty());
    assert!(dataset.columns.is_empty());
}

// ============================================================================
// Column inference
// ============================================================================

#[test]
fn test_columns_from_first_record() {
    let dataset = ingest(Some(DATASET), &ColumnHints::default());
    let names: Vec<_> = dataset.columns.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(
        names,
        vec!["FactRecID", "ServiceDate", "Amount", "Difference", "Comments"]
    );
    assert_eq!(dataset.auto_group_field.as_deref(), Some("FactRecID"));
}

#[test]
fn test_columns_sortable_and_filterable() {
    let dataset = ingest(Some(DATASET), &ColumnHints::default());
    for col in &dataset.columns {
        assert!(col.sortable, "{} should sort", col.field);
        assert!(col.filter, "{} should filter", col.field);
        assert!(col.floating_filter, "{} should have a floating filter", col.field);
    }
}

#[test_case("Amount", ColumnKind::Currency, FilterKind::Number)]
#[test_case("Difference", ColumnKind::Currency, FilterKind::Number)]
#[test_case("ServiceDate", ColumnKind::Text, FilterKind::Text)]
#[test_case("Comments", ColumnKind::Plain, FilterKind::Auto)]
#[test_case("FactRecID", ColumnKind::Plain, FilterKind::Auto)]
fn test_column_kinds(field: &str, kind: ColumnKind, filter: FilterKind) {
    let dataset = ingest(Some(DATASET), &ColumnHints::default());
    let col = dataset
        .columns
        .iter()
        .find(|c| c.field == field)
        .expect("column present");
    assert_eq!(col.kind, kind);
    assert_eq!(col.filter_kind(), filter);
}

#[test]
fn test_service_date_is_text_even_when_numeric() {
    let dataset = ingest(
        Some(r#"[{"FactRecID":"A","ServiceDate":45352}]"#),
        &ColumnHints::default(),
    );
    assert_eq!(dataset.columns[1].kind, ColumnKind::Text);
}

#[test]
fn test_aggregation_columns() {
    let dataset = ingest(Some(DATASET), &hints("Amount; Difference ;Missing"));
    let agg: Vec<_> = dataset
        .columns
        .iter()
        .map(|c| (c.field.as_str(), c.agg_func))
        .collect();
    assert_eq!(
        agg,
        vec![
            ("FactRecID", None),
            ("ServiceDate", None),
            ("Amount", Some(AggFunc::Sum)),
            ("Difference", Some(AggFunc::Sum)),
            ("Comments", None),
        ]
    );
}

#[test]
fn test_row_group_and_pivot_hints() {
    let dataset = ingest(
        Some(DATASET),
        &ColumnHints::from_lists(None, Some("ServiceDate"), Some("Comments")),
    );
    let date = &dataset.columns[1];
    assert!(date.enable_row_group);
    assert!(!date.enable_pivot);
    let comments = &dataset.columns[4];
    assert!(comments.enable_pivot);
    assert!(!comments.enable_row_group);
}

#[test]
fn test_column_defs_serialize_for_grid() {
    let dataset = ingest(Some(DATASET), &hints("Amount"));
    let json = serde_json::to_value(&dataset.columns).unwrap();
    assert_eq!(
        json[2],
        serde_json::json!({
            "field": "Amount",
            "type": "currencyColumn",
            "sortable": true,
            "filter": true,
            "floatingFilter": true,
            "aggFunc": "sum"
        })
    );
    assert_eq!(json[0].get("type"), None);
    assert_eq!(json[1]["type"], "textColumn");
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_ingest_is_idempotent() {
    let h = hints("Amount;Difference");
    let first = ingest(Some(DATASET), &h);
    let second = ingest(Some(DATASET), &h);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.records).unwrap(),
        serde_json::to_string(&second.records).unwrap()
    );
}
