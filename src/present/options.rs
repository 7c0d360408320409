//! Grid library configuration built from an ingested dataset.
//!
//! Serializes to the camelCase options object the grid library consumes.
//! The formatter and comparator in `columnTypes` are named here; the widget
//! replaces the names, and adds `getRowId` keyed on `rowIdField`, with live
//! functions before handing the object to the grid.

use std::collections::BTreeMap;

use serde::Serialize;

use super::lock::EditMode;
use super::style::row_class_rules;
use crate::ingest::Dataset;
use crate::types::ColumnDef;

/// Options applied to every column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultColDef {
    pub flex: u32,
    pub min_width: u32,
    pub filter: bool,
    pub floating_filter: bool,
    pub resizable: bool,
    pub editable: bool,
}

/// The auto-generated group column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoGroupColumnDef {
    pub min_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub header_checkbox_selection: bool,
    pub cell_renderer_params: CellRendererParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRendererParams {
    pub checkbox: bool,
}

/// Shared settings for a named column type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnType {
    pub filter: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_data_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_formatter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPanel {
    pub id: &'static str,
    pub label_default: &'static str,
    pub label_key: &'static str,
    pub icon_key: &'static str,
    pub tool_panel: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_panel_params: Option<ToolPanelParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPanelParams {
    pub suppress_pivot_mode: bool,
    pub suppress_row_groups: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBar {
    pub tool_panels: Vec<ToolPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPanel {
    pub status_panel: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBar {
    pub status_panels: Vec<StatusPanel>,
}

/// Complete grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub column_defs: Vec<ColumnDef>,
    pub default_col_def: DefaultColDef,
    pub auto_group_column_def: AutoGroupColumnDef,
    pub column_types: BTreeMap<&'static str, ColumnType>,
    /// Field the widget's `getRowId` callback reads.
    pub row_id_field: String,
    pub row_class_rules: BTreeMap<&'static str, String>,
    pub edit_mode: EditMode,
    pub side_bar: SideBar,
    pub status_bar: StatusBar,
    pub suppress_agg_func_in_header: bool,
    pub enable_range_selection: bool,
    pub pivot_mode: bool,
    pub row_group_panel_show: &'static str,
    pub pivot_panel_show: &'static str,
    pub pagination: bool,
    pub row_selection: &'static str,
    pub group_selects_children: bool,
    pub tooltip_show_delay: u32,
    /// Layout height in pixels.
    pub height: u32,
}

impl GridOptions {
    /// Build the configuration for `dataset` under `mode`.
    #[must_use]
    pub fn build(dataset: &Dataset, mode: EditMode, identity_field: &str, height: u32) -> Self {
        Self {
            column_defs: dataset.columns.clone(),
            default_col_def: DefaultColDef {
                flex: 1,
                min_width: 150,
                filter: true,
                floating_filter: true,
                resizable: true,
                editable: mode.cells_editable,
            },
            auto_group_column_def: AutoGroupColumnDef {
                min_width: 270,
                field: dataset.auto_group_field.clone(),
                header_checkbox_selection: true,
                cell_renderer_params: CellRendererParams { checkbox: true },
            },
            column_types: column_types(),
            row_id_field: identity_field.to_string(),
            row_class_rules: row_class_rules(identity_field),
            edit_mode: mode,
            side_bar: side_bar(),
            status_bar: status_bar(),
            suppress_agg_func_in_header: true,
            enable_range_selection: true,
            pivot_mode: false,
            row_group_panel_show: "always",
            pivot_panel_show: "never",
            pagination: true,
            row_selection: "multiple",
            group_selects_children: true,
            tooltip_show_delay: 500,
            height,
        }
    }
}

fn column_types() -> BTreeMap<&'static str, ColumnType> {
    let mut types = BTreeMap::new();
    types.insert(
        "currencyColumn",
        ColumnType {
            filter: "agNumberColumnFilter",
            cell_data_type: None,
            value_formatter: Some("formatAmount"),
            comparator: Some("compareAmounts"),
        },
    );
    types.insert(
        "textColumn",
        ColumnType {
            filter: "agTextColumnFilter",
            cell_data_type: Some("text"),
            value_formatter: None,
            comparator: None,
        },
    );
    types
}

fn side_bar() -> SideBar {
    SideBar {
        tool_panels: vec![
            ToolPanel {
                id: "columns",
                label_default: "Columns",
                label_key: "columns",
                icon_key: "columns",
                tool_panel: "agColumnsToolPanel",
                tool_panel_params: Some(ToolPanelParams {
                    suppress_pivot_mode: true,
                    suppress_row_groups: true,
                }),
            },
            ToolPanel {
                id: "filters",
                label_default: "Filters",
                label_key: "filters",
                icon_key: "filter",
                tool_panel: "agFiltersToolPanel",
                tool_panel_params: None,
            },
        ],
    }
}

fn status_bar() -> StatusBar {
    let panel = |status_panel: &'static str, align: Option<&'static str>| StatusPanel {
        status_panel,
        align,
    };
    StatusBar {
        status_panels: vec![
            panel("agTotalAndFilteredRowCountComponent", Some("left")),
            panel("agTotalRowCountComponent", Some("center")),
            panel("agFilteredRowCountComponent", None),
            panel("agSelectedRowCountComponent", None),
            panel("agAggregationComponent", None),
        ],
    }
}
