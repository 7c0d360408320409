//! Host inputs and integrator options.
//!
//! [`HostInputs`] mirrors the string properties the host platform binds to
//! the control and may change at any time. [`WidgetOptions`] is fixed when
//! the widget is created; its `lockPolarity` has no default so the meaning
//! of `gridLock` is always a deliberate choice.

use serde::{Deserialize, Serialize};

use crate::ingest::ColumnHints;
use crate::present::{LockPolarity, SavePolicy};
use crate::reconcile::ReconcileOptions;

/// Layout height used when the host does not provide one.
pub const DEFAULT_HEIGHT: u32 = 600;

/// File name for spreadsheet exports when none is configured.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "reconciliation.xlsx";

/// Properties bound by the host platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostInputs {
    /// Serialized dataset (JSON array of records).
    pub input_data: Option<String>,
    /// Semicolon-separated fields that get `sum` aggregation.
    pub agg_func_columns: Option<String>,
    /// Semicolon-separated fields the user may group by.
    pub enable_row_group_columns: Option<String>,
    /// Semicolon-separated fields the user may pivot on.
    pub pivot_columns: Option<String>,
    /// Layout height in pixels.
    pub height: Option<u32>,
    /// `"true"` / `"false"`, interpreted under [`LockPolarity`].
    pub grid_lock: Option<String>,
}

impl HostInputs {
    #[must_use]
    pub fn column_hints(&self) -> ColumnHints {
        ColumnHints::from_lists(
            self.agg_func_columns.as_deref(),
            self.enable_row_group_columns.as_deref(),
            self.pivot_columns.as_deref(),
        )
    }

    #[must_use]
    pub fn height_px(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    /// True when `other` would ingest to a different dataset.
    #[must_use]
    pub fn dataset_differs(&self, other: &Self) -> bool {
        self.input_data != other.input_data
            || self.agg_func_columns != other.agg_func_columns
            || self.enable_row_group_columns != other.enable_row_group_columns
            || self.pivot_columns != other.pivot_columns
    }
}

/// Integrator configuration, fixed for the widget's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Which `gridLock` value unlocks the grid. Required.
    pub lock_polarity: LockPolarity,
    #[serde(default)]
    pub save_policy: SavePolicy,
    #[serde(default)]
    pub reconcile: ReconcileOptions,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl WidgetOptions {
    /// Options with defaults for everything except the lock polarity.
    #[must_use]
    pub fn new(lock_polarity: LockPolarity) -> Self {
        Self {
            lock_polarity,
            save_policy: SavePolicy::default(),
            reconcile: ReconcileOptions::default(),
            export_file_name: default_export_file_name(),
        }
    }

    #[must_use]
    pub fn with_save_policy(mut self, policy: SavePolicy) -> Self {
        self.save_policy = policy;
        self
    }

    #[must_use]
    pub fn with_audit_annotation(mut self, enabled: bool) -> Self {
        self.reconcile.audit_annotation = enabled;
        self
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
    fn test_options_require_polarity() {
        let err = serde_json::from_str::<WidgetOptions>("{}");
        assert!(err.is_err());

        let opts: WidgetOptions =
            serde_json::from_str(r#"{"lockPolarity":"editableWhenFalse"}"#).unwrap();
        assert_eq!(opts.lock_polarity, LockPolarity::EditableWhenFalse);
        assert_eq!(opts.save_policy, SavePolicy::ChangedOnly);
        assert_eq!(opts.reconcile.identity_field, "FactRecID");
        assert!(!opts.reconcile.audit_annotation);
    }

    #[test]
    fn test_options_overrides() {
        let opts: WidgetOptions = serde_json::from_str(
            r#"{"lockPolarity":"editableWhenTrue","savePolicy":"allRows",
                "reconcile":{"auditAnnotation":true,"annotationField":"Notes"}}"#,
        )
        .unwrap();
        assert_eq!(opts.save_policy, SavePolicy::AllRows);
        assert!(opts.reconcile.audit_annotation);
        assert_eq!(opts.reconcile.annotation_field, "Notes");
        assert_eq!(opts.reconcile.amount_field, "Amount");
    }

    #[test]
    fn test_host_inputs_camel_case() {
        let inputs: HostInputs = serde_json::from_str(
            r#"{"inputData":"[]","aggFuncColumns":"Amount","gridLock":"false","height":420}"#,
        )
        .unwrap();
        assert_eq!(inputs.height_px(), 420);
        assert_eq!(inputs.column_hints().agg_func_columns, vec!["Amount"]);
        assert_eq!(HostInputs::default().height_px(), DEFAULT_HEIGHT);
    }

    #[test]
    fn test_dataset_differs_ignores_lock_and_height() {
        let a = HostInputs {
            input_data: Some("[]".into()),
            ..HostInputs::default()
        };
        let mut b = a.clone();
        b.grid_lock = Some("true".into());
        b.height = Some(900);
        assert!(!a.dataset_differs(&b));
        b.agg_func_columns = Some("Amount".into());
        assert!(a.dataset_differs(&b));
    }
}
