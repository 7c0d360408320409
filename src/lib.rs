//! recon-grid - reconciliation grid widget for the web
//!
//! Bookkeeping core of an embedded, editable data grid used for account
//! reconciliation:
//! - Ingests a JSON dataset and infers the grid's columns
//! - Tracks row identity across edits and amount splits
//!   (`FactRecID` → `Updated-<n>-…` / `New-<n>-…`)
//! - Keeps the grid library's rows in step through transactions
//! - Extracts changed rows for the host on save
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ReconGrid, formatAmount, compareAmounts } from 'recon-grid';
//! await init();
//! const widget = new ReconGrid({ lockPolarity: 'editableWhenFalse' });
//! widget.updateInputs({ inputData, aggFuncColumns, gridLock: 'false' });
//! const options = widget.gridOptions();
//! // ... in onGridReady:
//! widget.attachGrid(event.api);
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod present;
pub mod reconcile;
pub mod session;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod widget;

use serde_json::Value;
use wasm_bindgen::prelude::*;

pub use config::{HostInputs, WidgetOptions};
pub use error::{ReconGridError, Result, ValidationError};
pub use ingest::{ingest, ColumnHints, Dataset};
pub use present::{GridAdapter, LockPolarity, MemoryGrid, SavePolicy};
pub use reconcile::{EditOutcome, ReconcileOptions, Reconciler, SplitReport};
pub use session::GridSession;
pub use types::{Record, RecordId};

#[cfg(target_arch = "wasm32")]
pub use widget::ReconGrid;

fn js_to_value(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null)
}

/// Display text for a currency cell (`-150` → `"(150)"`).
#[must_use]
#[wasm_bindgen(js_name = "formatAmount")]
pub fn format_amount(value: JsValue) -> String {
    present::format_amount(&js_to_value(value))
}

/// Comparator for currency columns: negative, zero or positive.
#[must_use]
#[wasm_bindgen(js_name = "compareAmounts")]
pub fn compare_amounts(a: JsValue, b: JsValue) -> i32 {
    match present::compare_amounts(&js_to_value(a), &js_to_value(b)) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Row CSS class for an identifier, if it is tagged New or Updated.
#[must_use]
#[wasm_bindgen(js_name = "rowClass")]
pub fn row_class(id: &str) -> Option<String> {
    present::row_class(id).map(str::to_string)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
