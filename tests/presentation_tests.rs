//! Tests for display formatting, sorting, locking and grid options.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cmp::Ordering;

use common::{ids, record};
use recon_grid::ingest::{ingest, ColumnHints};
use recon_grid::present::{
    compare_amounts, extract, format_amount, row_class, sort_amounts, EditMode, GridOptions,
    LockPolarity, SavePolicy,
};
use serde_json::{json, Value};
use test_case::test_case;

// ============================================================================
// Amount formatting
// ============================================================================

#[test_case(json!(-150), "(150)" ; "negative number")]
#[test_case(json!("-150"), "(150)" ; "negative string")]
#[test_case(json!(1234.5), "1,234.5" ; "grouped with one decimal")]
#[test_case(json!(1_000_000), "1,000,000" ; "millions")]
#[test_case(json!(-1234.56), "(1,234.56)" ; "negative grouped")]
#[test_case(json!("70.00"), "70" ; "trailing zeros dropped")]
#[test_case(json!("(50)"), "(50)" ; "parenthesized input")]
#[test_case(json!("1,234"), "1,234" ; "grouped input")]
#[test_case(json!(0), "0" ; "zero")]
#[test_case(json!("abc"), "" ; "non numeric")]
#[test_case(json!(""), "" ; "empty")]
#[test_case(Value::Null, "" ; "null")]
fn test_format_amount(value: Value, expected: &str) {
    assert_eq!(format_amount(&value), expected);
}

// ============================================================================
// Amount comparator
// ============================================================================

#[test]
fn test_sort_amounts_ascending() {
    let mut cells = vec![json!(10), json!(""), json!("(5)"), json!("-50"), json!("(50)")];
    sort_amounts(&mut cells);
    // Empty cells sort first; "-50" and "(50)" are equal and keep their order
    assert_eq!(
        cells,
        vec![json!(""), json!("-50"), json!("(50)"), json!("(5)"), json!(10)]
    );
}

#[test_case(json!("(50)"), json!(-50), Ordering::Equal ; "parentheses equal minus")]
#[test_case(json!("(50)"), json!("(5)"), Ordering::Less ; "larger debit first")]
#[test_case(json!(null), json!(-1_000_000), Ordering::Less ; "null before numbers")]
#[test_case(json!(""), json!(null), Ordering::Equal ; "blank equals null")]
#[test_case(json!("1,500"), json!(200), Ordering::Greater ; "grouped string")]
fn test_compare_amounts(a: Value, b: Value, expected: Ordering) {
    assert_eq!(compare_amounts(&a, &b), expected);
    assert_eq!(compare_amounts(&b, &a), expected.reverse());
}

// ============================================================================
// Lock polarity
// ============================================================================

#[test_case(Some("false"), LockPolarity::EditableWhenFalse, false ; "false unlocks")]
#[test_case(Some("true"), LockPolarity::EditableWhenFalse, true ; "true locks")]
#[test_case(Some("true"), LockPolarity::EditableWhenTrue, false ; "inverted true unlocks")]
#[test_case(Some("false"), LockPolarity::EditableWhenTrue, true ; "inverted false locks")]
#[test_case(Some(" TRUE "), LockPolarity::EditableWhenTrue, false ; "case and whitespace")]
#[test_case(Some("yes"), LockPolarity::EditableWhenFalse, true ; "unrecognized locks")]
#[test_case(Some(""), LockPolarity::EditableWhenTrue, true ; "empty locks")]
#[test_case(None, LockPolarity::EditableWhenFalse, true ; "missing locks")]
fn test_lock_resolution(flag: Option<&str>, polarity: LockPolarity, locked: bool) {
    let mode = EditMode::resolve(flag, polarity);
    assert_eq!(mode.is_locked(), locked);
    assert_eq!(mode.show_row_actions, !locked);
    assert_eq!(mode.cells_editable, !locked);
}

// ============================================================================
// Row styling
// ============================================================================

#[test_case("New-1-8edc", Some("row-new"))]
#[test_case("Updated-12-x", Some("row-updated"))]
#[test_case("8edc", None)]
#[test_case("New-x-8edc", None ; "non numeric sequence")]
#[test_case("Updated-3-", None ; "empty base")]
fn test_row_class(id: &str, expected: Option<&str>) {
    assert_eq!(row_class(id), expected);
}

// ============================================================================
// Extraction
// ============================================================================

fn grid_rows() -> Vec<recon_grid::Record> {
    vec![
        record(json!({"FactRecID": "Updated-1-A", "Amount": "70.00"})),
        record(json!({"FactRecID": "New-1-A", "Amount": "30.00"})),
        record(json!({"FactRecID": "B", "Amount": "-40"})),
        record(json!({"Amount": "1"})),
    ]
}

#[test]
fn test_extract_changed_only() {
    let saved = extract(grid_rows(), SavePolicy::ChangedOnly, "FactRecID");
    assert_eq!(ids(&saved), vec!["Updated-1-A", "New-1-A"]);
}

#[test]
fn test_extract_all_rows() {
    let saved = extract(grid_rows(), SavePolicy::AllRows, "FactRecID");
    assert_eq!(saved, grid_rows());
}

#[test]
fn test_extract_serializes_rows_verbatim() {
    let saved = extract(grid_rows(), SavePolicy::ChangedOnly, "FactRecID");
    assert_eq!(
        serde_json::to_string(&saved).unwrap(),
        r#"[{"FactRecID":"Updated-1-A","Amount":"70.00"},{"FactRecID":"New-1-A","Amount":"30.00"}]"#
    );
}

// ============================================================================
// Grid options
// ============================================================================

const DATASET: &str = r#"[{"FactRecID":"A","ServiceDate":"2024-03-01","Amount":"100"}]"#;

fn options_json(mode: EditMode) -> Value {
    let dataset = ingest(Some(DATASET), &ColumnHints::from_lists(Some("Amount"), None, None));
    serde_json::to_value(GridOptions::build(&dataset, mode, "FactRecID", 480)).unwrap()
}

#[test]
fn test_grid_options_editable_follows_lock() {
    assert_eq!(options_json(EditMode::UNLOCKED)["defaultColDef"]["editable"], true);
    assert_eq!(options_json(EditMode::LOCKED)["defaultColDef"]["editable"], false);
    assert_eq!(
        options_json(EditMode::LOCKED)["editMode"],
        json!({"cellsEditable": false, "showRowActions": false})
    );
}

#[test]
fn test_grid_options_shape() {
    let json = options_json(EditMode::UNLOCKED);
    assert_eq!(json["columnDefs"].as_array().unwrap().len(), 3);
    assert_eq!(json["autoGroupColumnDef"]["field"], "FactRecID");
    assert_eq!(json["autoGroupColumnDef"]["minWidth"], 270);
    assert_eq!(json["defaultColDef"]["minWidth"], 150);
    assert_eq!(json["rowIdField"], "FactRecID");
    assert_eq!(json["height"], 480);
    assert_eq!(json["pagination"], true);
    assert_eq!(json["rowSelection"], "multiple");
    assert_eq!(
        json["columnTypes"]["currencyColumn"],
        json!({
            "filter": "agNumberColumnFilter",
            "valueFormatter": "formatAmount",
            "comparator": "compareAmounts"
        })
    );
    assert_eq!(json["columnTypes"]["textColumn"]["cellDataType"], "text");
    assert_eq!(json["sideBar"]["toolPanels"].as_array().unwrap().len(), 2);
    assert_eq!(json["statusBar"]["statusPanels"].as_array().unwrap().len(), 5);
}

#[test]
fn test_grid_options_row_class_rules() {
    let json = options_json(EditMode::UNLOCKED);
    let rules = json["rowClassRules"].as_object().unwrap();
    assert!(rules["row-new"].as_str().unwrap().contains("^New-"));
    assert!(rules["row-updated"].as_str().unwrap().contains("^Updated-"));
    assert!(rules["row-new"].as_str().unwrap().contains("data['FactRecID']"));
}

#[test]
fn test_grid_options_empty_schema() {
    let dataset = ingest(Some("not json"), &ColumnHints::default());
    let json =
        serde_json::to_value(GridOptions::build(&dataset, EditMode::LOCKED, "FactRecID", 600))
            .unwrap();
    assert_eq!(json["columnDefs"], json!([]));
    assert_eq!(json["autoGroupColumnDef"].get("field"), None);
}
