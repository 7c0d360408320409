//! One widget instance: ingestor, reconciler and grid wired together.
//!
//! `GridSession` is generic over the [`GridAdapter`] so the same event
//! handlers run against the JavaScript grid in the browser and against
//! [`MemoryGrid`](crate::present::MemoryGrid) natively.

use serde_json::{Map, Value};

use crate::config::{HostInputs, WidgetOptions};
use crate::error::{ReconGridError, Result};
use crate::ingest::{ingest, Dataset};
use crate::present::{extract, EditMode, GridAdapter, GridOptions};
use crate::reconcile::{EditOutcome, Reconciler, SplitReport};
use crate::types::{ColumnDef, Record, RowTransaction};

/// State of one mounted widget.
pub struct GridSession<A: GridAdapter> {
    options: WidgetOptions,
    inputs: HostInputs,
    /// Schema of the current dataset; its records live in the reconciler.
    schema: Dataset,
    edit_mode: EditMode,
    reconciler: Reconciler,
    grid: A,
    loaded: bool,
}

impl<A: GridAdapter> GridSession<A> {
    /// Create an empty, locked session.
    pub fn new(options: WidgetOptions, grid: A) -> Self {
        let reconciler = Reconciler::new(options.reconcile.clone());
        Self {
            options,
            inputs: HostInputs::default(),
            schema: Dataset::default(),
            edit_mode: EditMode::LOCKED,
            reconciler,
            grid,
            loaded: false,
        }
    }

    /// Take new host inputs.
    ///
    /// Re-ingests only when the dataset or its column hints changed; a lock
    /// or height change just updates the edit mode, which is pushed to the
    /// grid so its cells follow the lock. Returns whether the rows were
    /// reloaded.
    ///
    /// # Errors
    /// Fails only if the grid rejects the new rows or edit mode.
    pub fn update_inputs(&mut self, inputs: HostInputs) -> Result<bool> {
        let reload = !self.loaded || self.inputs.dataset_differs(&inputs);
        let edit_mode = EditMode::resolve(inputs.grid_lock.as_deref(), self.options.lock_polarity);
        let mode_changed = edit_mode != self.edit_mode;
        self.edit_mode = edit_mode;
        self.inputs = inputs;

        if mode_changed {
            self.grid.set_edit_mode(edit_mode)?;
        }

        if reload {
            let mut dataset = ingest(self.inputs.input_data.as_deref(), &self.inputs.column_hints());
            let records = std::mem::take(&mut dataset.records);
            self.reconciler.replace_records(records);
            self.schema = dataset;
            self.loaded = true;
            self.grid.set_rows(self.reconciler.records())?;
        }
        Ok(reload)
    }

    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    #[must_use]
    pub fn inputs(&self) -> &HostInputs {
        &self.inputs
    }

    #[must_use]
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.schema.columns
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        self.reconciler.records()
    }

    #[must_use]
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    #[must_use]
    pub fn grid(&self) -> &A {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut A {
        &mut self.grid
    }

    /// Grid configuration for the current schema and lock state.
    #[must_use]
    pub fn grid_options(&self) -> GridOptions {
        GridOptions::build(
            &self.schema,
            self.edit_mode,
            &self.options.reconcile.identity_field,
            self.inputs.height_px(),
        )
    }

    /// Push every row and the edit mode to the grid again (e.g. once it
    /// reports ready).
    ///
    /// # Errors
    /// Propagates grid failures.
    pub fn sync_grid(&mut self) -> Result<()> {
        self.grid.set_rows(self.reconciler.records())?;
        self.grid.set_edit_mode(self.edit_mode)
    }

    /// Cell-edit handler.
    ///
    /// An identifier the reconciler no longer knows is logged and ignored.
    /// The grid has already written the edit into its own row by the time
    /// this runs, so a refused edit restores the row from the reconciler.
    ///
    /// # Errors
    /// [`ReconGridError::Locked`] while read-only, or a grid failure.
    pub fn record_edited(
        &mut self,
        identifier: &str,
        new_values: &Map<String, Value>,
    ) -> Result<EditOutcome> {
        if self.edit_mode.is_locked() {
            self.restore_row(identifier)?;
            return Err(ReconGridError::Locked);
        }

        match self.reconciler.record_edited(identifier, new_values) {
            Ok(report) => {
                if !report.transaction.is_empty() {
                    self.grid.apply_transaction(&report.transaction)?;
                }
                Ok(report.outcome)
            }
            Err(ReconGridError::UnknownRecord(id)) => {
                log::warn!("edit for unknown row {id}; ignoring");
                Ok(EditOutcome::Ignored { id })
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the grid's copy of `identifier` with the reconciler's.
    fn restore_row(&mut self, identifier: &str) -> Result<()> {
        let Some(record) = self.reconciler.get(identifier) else {
            return Ok(());
        };
        let transaction = RowTransaction {
            update: vec![record.clone()],
            ..RowTransaction::default()
        };
        log::warn!("edit to {identifier} refused while locked; restoring row");
        self.grid.apply_transaction(&transaction)
    }

    /// Transfer-button handler.
    ///
    /// # Errors
    /// [`ReconGridError::Locked`] while read-only,
    /// [`ReconGridError::Validation`] for input the user must fix, or
    /// [`ReconGridError::UnknownRecord`] for a stale selection.
    pub fn split_amount(&mut self, source: Option<&str>, transfer: Option<f64>) -> Result<SplitReport> {
        if self.edit_mode.is_locked() {
            return Err(ReconGridError::Locked);
        }

        let report = self.reconciler.split_amount(source, transfer)?;
        self.grid.apply_transaction(&report.transaction)?;
        Ok(report)
    }

    /// Rows for the host's `onDataChange`, read from the live grid.
    ///
    /// # Errors
    /// Propagates grid failures.
    pub fn save(&self) -> Result<Vec<Record>> {
        let rows = self.grid.rows()?;
        Ok(extract(
            rows,
            self.options.save_policy,
            &self.options.reconcile.identity_field,
        ))
    }

    /// [`save`](Self::save) serialized for hosts that persist strings.
    ///
    /// # Errors
    /// Propagates grid and serialization failures.
    pub fn save_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.save()?)?)
    }

    /// Export-button handler.
    ///
    /// # Errors
    /// Propagates grid failures.
    pub fn export(&mut self) -> Result<()> {
        let file_name = self.options.export_file_name.clone();
        self.grid.export_spreadsheet(&file_name)
    }
}
