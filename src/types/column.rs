use serde::{Deserialize, Serialize};

use super::is_false;

/// How a column's values are displayed, filtered and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Library defaults.
    #[serde(rename = "plainColumn")]
    Plain,
    /// Amount formatter, amount comparator, numeric filter.
    #[serde(rename = "currencyColumn")]
    Currency,
    /// Text filter and formatting regardless of runtime type.
    #[serde(rename = "textColumn")]
    Text,
}

impl ColumnKind {
    pub(crate) fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Filter flavor a column gets in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Auto,
    Text,
    Number,
}

/// Aggregation attached to a column when rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    Sum,
}

/// A column definition inferred from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    /// Grid column type; plain columns carry none.
    #[serde(rename = "type", skip_serializing_if = "ColumnKind::is_plain", default = "plain")]
    pub kind: ColumnKind,
    pub sortable: bool,
    pub filter: bool,
    pub floating_filter: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agg_func: Option<AggFunc>,
    #[serde(skip_serializing_if = "is_false", default)]
    pub enable_row_group: bool,
    #[serde(skip_serializing_if = "is_false", default)]
    pub enable_pivot: bool,
}

fn plain() -> ColumnKind {
    ColumnKind::Plain
}

impl ColumnDef {
    /// A sortable, filterable column with library defaults.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Plain,
            sortable: true,
            filter: true,
            floating_filter: true,
            agg_func: None,
            enable_row_group: false,
            enable_pivot: false,
        }
    }

    #[must_use]
    pub fn filter_kind(&self) -> FilterKind {
        match self.kind {
            ColumnKind::Plain => FilterKind::Auto,
            ColumnKind::Currency => FilterKind::Number,
            ColumnKind::Text => FilterKind::Text,
        }
    }
}
