//! Common test utilities.
//!
//! Builders for records, datasets and sessions over the in-memory grid.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{Map, Value};

use recon_grid::present::{GridAdapter, LockPolarity, MemoryGrid};
use recon_grid::types::Record;
use recon_grid::{GridSession, HostInputs, WidgetOptions};

/// The two-row dataset used throughout the reconciliation tests.
pub const TWO_ROWS: &str =
    r#"[{"FactRecID":"A","Amount":"100"},{"FactRecID":"B","Amount":"-40"}]"#;

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => Record::from_map(map),
        other => panic!("expected an object, got {other}"),
    }
}

/// Build a field map from a JSON object literal.
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Identifiers of `records` in order.
pub fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.id_in("FactRecID").expect("row without FactRecID"))
        .collect()
}

/// Text of the `Amount` field of `records` in order.
pub fn amounts(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.text_in("Amount")).collect()
}

/// Host inputs carrying `data`, unlocked under `EditableWhenFalse`.
pub fn unlocked_inputs(data: &str) -> HostInputs {
    HostInputs {
        input_data: Some(data.to_string()),
        grid_lock: Some("false".to_string()),
        ..HostInputs::default()
    }
}

/// An unlocked session over `data` with the given options.
pub fn session_with(options: WidgetOptions, data: &str) -> GridSession<MemoryGrid> {
    let grid = MemoryGrid::new(options.reconcile.identity_field.clone());
    let mut session = GridSession::new(options, grid);
    session
        .update_inputs(unlocked_inputs(data))
        .expect("load should succeed");
    session
}

/// An unlocked session over `data` with default options.
pub fn session(data: &str) -> GridSession<MemoryGrid> {
    session_with(WidgetOptions::new(LockPolarity::EditableWhenFalse), data)
}

/// Assert the grid's rows match the reconciler's rows exactly.
pub fn assert_grid_in_sync(session: &GridSession<MemoryGrid>) {
    let grid_rows = session.grid().rows().expect("memory grid rows");
    assert_eq!(grid_rows.as_slice(), session.records());
}
