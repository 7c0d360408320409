//! The seam between the session and the embedded grid library.

use super::lock::EditMode;
use crate::error::{ReconGridError, Result};
use crate::types::{Record, RowTransaction};

/// Operations the session needs from the grid library.
///
/// Rows are addressed by the identity field, matching the row-id callback
/// the library is configured with.
pub trait GridAdapter {
    /// Replace every row (fresh load).
    fn set_rows(&mut self, rows: &[Record]) -> Result<()>;

    /// Push a reconciler mutation without a full re-render.
    fn apply_transaction(&mut self, transaction: &RowTransaction) -> Result<()>;

    /// Snapshot of the rows as the grid currently holds them.
    fn rows(&self) -> Result<Vec<Record>>;

    /// Export the visible rows as a spreadsheet file.
    fn export_spreadsheet(&mut self, file_name: &str) -> Result<()>;

    /// Make cells editable or read-only after the grid was configured.
    fn set_edit_mode(&mut self, mode: EditMode) -> Result<()>;
}

/// In-memory grid with the library's transaction semantics.
///
/// Used natively (CLI, tests) where no JavaScript grid exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    identity_field: String,
    rows: Vec<Record>,
    exports: Vec<String>,
    edit_mode: Option<EditMode>,
}

impl MemoryGrid {
    #[must_use]
    pub fn new(identity_field: impl Into<String>) -> Self {
        Self {
            identity_field: identity_field.into(),
            ..Self::default()
        }
    }

    /// File names passed to [`GridAdapter::export_spreadsheet`], oldest first.
    #[must_use]
    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Edit mode last pushed through [`GridAdapter::set_edit_mode`].
    #[must_use]
    pub fn edit_mode(&self) -> Option<EditMode> {
        self.edit_mode
    }

    fn position(&self, record: &Record) -> Result<usize> {
        let id = record.id_in(&self.identity_field).ok_or_else(|| {
            ReconGridError::Grid(format!("row without {}", self.identity_field))
        })?;
        self.rows
            .iter()
            .position(|r| r.id_in(&self.identity_field).as_deref() == Some(id.as_str()))
            .ok_or_else(|| ReconGridError::Grid(format!("no row with id {id}")))
    }
}

impl GridAdapter for MemoryGrid {
    fn set_rows(&mut self, rows: &[Record]) -> Result<()> {
        self.rows = rows.to_vec();
        Ok(())
    }

    fn apply_transaction(&mut self, transaction: &RowTransaction) -> Result<()> {
        // Same order as the library: remove, update, add
        for stub in &transaction.remove {
            let idx = self.position(stub)?;
            self.rows.remove(idx);
        }
        for record in &transaction.update {
            let idx = self.position(record)?;
            if let Some(slot) = self.rows.get_mut(idx) {
                *slot = record.clone();
            }
        }

        let mut at = transaction
            .add_index
            .unwrap_or(self.rows.len())
            .min(self.rows.len());
        for record in &transaction.add {
            self.rows.insert(at, record.clone());
            at += 1;
        }
        Ok(())
    }

    fn rows(&self) -> Result<Vec<Record>> {
        Ok(self.rows.clone())
    }

    fn export_spreadsheet(&mut self, file_name: &str) -> Result<()> {
        self.exports.push(file_name.to_string());
        Ok(())
    }

    fn set_edit_mode(&mut self, mode: EditMode) -> Result<()> {
        self.edit_mode = Some(mode);
        Ok(())
    }
}
