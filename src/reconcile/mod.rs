//! Row-identity reconciliation.
//!
//! The reconciler owns the record collection and the identifier scheme:
//! - The first edit of an Original row renames it `Updated-<n>-<id>`
//! - Splitting an amount renames the source the same way and inserts a
//!   `New-<n>-<base>` row right after it
//! - A row tagged New or Updated keeps its identifier for the session
//!
//! Every mutation returns the [`RowTransaction`] that brings the grid
//! library's own row state in line with the collection.

mod allocator;
pub mod split;

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::amount::to_fixed2;
use crate::error::{ReconGridError, Result, ValidationError};
use crate::types::{IdTag, Record, RecordId, RowTransaction};

pub use allocator::IdAllocator;

/// Field names and switches the reconciler works with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileOptions {
    /// Identity key of every record.
    pub identity_field: String,
    /// Numeric field a split divides.
    pub amount_field: String,
    /// Free-text field that receives the audit annotation.
    pub annotation_field: String,
    /// Append the pre-split amount to `annotation_field` on split.
    pub audit_annotation: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            identity_field: "FactRecID".to_string(),
            amount_field: "Amount".to_string(),
            annotation_field: "Comments".to_string(),
            audit_annotation: false,
        }
    }
}

/// What an edit did to the row's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Values merged into a New/Updated row; identifier unchanged.
    Applied { id: String },
    /// An Original row was renamed on its first edit.
    Converted { from: String, to: String },
    /// Edit for an Original identifier that was already converted.
    Ignored { id: String },
}

/// Result of [`Reconciler::record_edited`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditReport {
    pub outcome: EditOutcome,
    pub transaction: RowTransaction,
}

/// Result of [`Reconciler::split_amount`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitReport {
    /// Source identifier after the split (possibly renamed).
    pub source_id: String,
    /// Identifier of the inserted row.
    pub new_id: String,
    /// Position of the source row; the new row sits at `source_index + 1`.
    pub source_index: usize,
    /// Amount left on the source row.
    pub remainder: f64,
    pub transaction: RowTransaction,
}

/// Owner of the record collection and the identifier lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
    ids: IdAllocator,
    converted: HashSet<String>,
    records: Vec<Record>,
}

impl Reconciler {
    #[must_use]
    pub fn new(options: ReconcileOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Start a session over an already-ingested record collection.
    #[must_use]
    pub fn with_records(options: ReconcileOptions, records: Vec<Record>) -> Self {
        let mut reconciler = Self::new(options);
        reconciler.reset(records);
        reconciler
    }

    /// Replace the collection after a fresh load.
    ///
    /// Counters and the converted set start over, then skip past any
    /// tagged identifiers the new records already carry.
    pub fn reset(&mut self, records: Vec<Record>) {
        self.ids.reset();
        self.replace_records(records);
    }

    /// Swap in a re-ingested collection within the same session.
    ///
    /// Counters keep running so identifiers stay unique for the session;
    /// the converted set only describes rows of the previous collection.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.converted.clear();
        for record in &records {
            if let Some(id) = self.id_of(record) {
                self.ids.observe(&RecordId::parse(&id));
            }
        }
        self.records = records;
    }

    #[must_use]
    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    /// Identifier of a record under the configured identity field.
    #[must_use]
    pub fn id_of(&self, record: &Record) -> Option<String> {
        record.id_in(&self.options.identity_field)
    }

    /// Position of the record keyed `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| self.id_of(r).as_deref() == Some(id))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position(id).and_then(|idx| self.records.get(idx))
    }

    /// Whether an Original identifier has already been renamed.
    #[must_use]
    pub fn is_converted(&self, original_id: &str) -> bool {
        self.converted.contains(original_id)
    }

    /// Records whose identifier is tagged New or Updated, in collection order.
    pub fn changed_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| {
            self.id_of(r)
                .is_some_and(|id| RecordId::parse(&id).tag() != IdTag::Original)
        })
    }

    /// Apply a cell edit to the row keyed `identifier`.
    ///
    /// # Errors
    /// [`ReconGridError::UnknownRecord`] when no row carries `identifier`.
    pub fn record_edited(
        &mut self,
        identifier: &str,
        new_values: &Map<String, Value>,
    ) -> Result<EditReport> {
        let id = RecordId::parse(identifier);

        if id.is_original() && self.converted.contains(identifier) {
            log::warn!("edit for {identifier} arrived after it was renamed; ignoring");
            return Ok(EditReport {
                outcome: EditOutcome::Ignored {
                    id: identifier.to_string(),
                },
                transaction: RowTransaction::default(),
            });
        }

        let index = self
            .position(identifier)
            .ok_or_else(|| ReconGridError::UnknownRecord(identifier.to_string()))?;
        let id_field = self.options.identity_field.clone();
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| ReconGridError::UnknownRecord(identifier.to_string()))?;
        record.merge_from(new_values, &id_field);

        let mut transaction = RowTransaction::default();
        let outcome = match self.convert_at(index, &id) {
            Some(to) => {
                transaction.push_remove(&id_field, identifier);
                transaction.add.extend(self.records.get(index).cloned());
                transaction.add_index = Some(index);
                EditOutcome::Converted {
                    from: identifier.to_string(),
                    to,
                }
            }
            None => {
                transaction.update.extend(self.records.get(index).cloned());
                EditOutcome::Applied {
                    id: identifier.to_string(),
                }
            }
        };

        Ok(EditReport {
            outcome,
            transaction,
        })
    }

    /// Move `transfer` off the row keyed `source` into a new row.
    ///
    /// Validation happens before anything is touched, so a rejected split
    /// leaves the collection and the counters exactly as they were.
    ///
    /// # Errors
    /// [`ReconGridError::Validation`] for bad input or a rule violation,
    /// [`ReconGridError::UnknownRecord`] when `source` is not present.
    pub fn split_amount(&mut self, source: Option<&str>, transfer: Option<f64>) -> Result<SplitReport> {
        let source = source.ok_or(ValidationError::NoRowSelected)?;
        let transfer = split::validate_transfer(transfer)?;

        let index = self
            .position(source)
            .ok_or_else(|| ReconGridError::UnknownRecord(source.to_string()))?;
        let pre_split = self
            .records
            .get(index)
            .cloned()
            .ok_or_else(|| ReconGridError::UnknownRecord(source.to_string()))?;
        let original = pre_split
            .amount_in(&self.options.amount_field)
            .ok_or_else(|| ValidationError::NonNumericAmount {
                id: source.to_string(),
            })?;
        let remainder = split::check_split(original, transfer)?;

        let id_field = self.options.identity_field.clone();
        let amount_field = self.options.amount_field.clone();
        let source_id = RecordId::parse(source);

        // New row: shallow copy of the source as it was before the split
        let new_id = RecordId::New {
            seq: self.ids.next_new(),
            base: source_id.split_base(),
        }
        .to_string();
        let mut created = pre_split;
        created.set(&id_field, Value::String(new_id.clone()));
        created.set(&amount_field, Value::String(to_fixed2(transfer)));

        if let Some(record) = self.records.get_mut(index) {
            record.set(&amount_field, Value::String(to_fixed2(remainder)));
        }
        let renamed = self.convert_at(index, &source_id);

        if self.options.audit_annotation {
            let field = self.options.annotation_field.clone();
            if let Some(record) = self.records.get_mut(index) {
                split::annotate(record, &field, original);
            }
            split::annotate(&mut created, &field, original);
        }

        let insert_at = index.saturating_add(1);
        self.records.insert(insert_at.min(self.records.len()), created.clone());

        let mut transaction = RowTransaction::default();
        let source_record = self.records.get(index).cloned();
        let source_id = match renamed {
            Some(to) => {
                transaction.push_remove(&id_field, source);
                transaction.add.extend(source_record);
                transaction.add.push(created);
                transaction.add_index = Some(index);
                to
            }
            None => {
                transaction.update.extend(source_record);
                transaction.add.push(created);
                transaction.add_index = Some(insert_at);
                source.to_string()
            }
        };

        Ok(SplitReport {
            source_id,
            new_id,
            source_index: index,
            remainder,
            transaction,
        })
    }

    /// Rename the Original row at `index` to `Updated-<n>-<id>`.
    ///
    /// Returns the new identifier, or `None` when the row keeps its
    /// identifier (already tagged, or already converted).
    fn convert_at(&mut self, index: usize, id: &RecordId) -> Option<String> {
        let RecordId::Original(raw) = id else {
            return None;
        };
        if self.converted.contains(raw) {
            return None;
        }

        let updated = RecordId::Updated {
            seq: self.ids.next_updated(),
            base: raw.clone(),
        }
        .to_string();
        let record = self.records.get_mut(index)?;
        record.set(&self.options.identity_field, Value::String(updated.clone()));
        self.converted.insert(raw.clone());
        Some(updated)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> Record {
        match value {
            Value::Object(map) => Record::from_map(map),
            _ => panic!("not an object"),
        }
    }

    fn reconciler(rows: Vec<Value>) -> Reconciler {
        Reconciler::with_records(
            ReconcileOptions::default(),
            rows.into_iter().map(rec).collect(),
        )
    }

    #[test]
    fn test_unknown_record_allocates_nothing() {
        let mut r = reconciler(vec![json!({"FactRecID": "A", "Amount": "1"})]);
        let err = r.record_edited("missing", &Map::new()).unwrap_err();
        assert!(matches!(err, ReconGridError::UnknownRecord(_)));
        assert_eq!(r.allocator().issued_updated(), 0);
    }

    #[test]
    fn test_rejected_split_allocates_nothing() {
        let mut r = reconciler(vec![json!({"FactRecID": "A", "Amount": "-100"})]);
        let before = r.records().to_vec();
        let err = r.split_amount(Some("A"), Some(150.0)).unwrap_err();
        assert!(matches!(
            err,
            ReconGridError::Validation(ValidationError::SignFlip { .. })
        ));
        assert_eq!(r.records(), before.as_slice());
        assert_eq!(r.allocator().issued_new(), 0);
        assert_eq!(r.allocator().issued_updated(), 0);
    }

    #[test]
    fn test_counters_skip_existing_tags() {
        let mut r = reconciler(vec![
            json!({"FactRecID": "New-4-A", "Amount": "10"}),
            json!({"FactRecID": "Updated-2-B", "Amount": "5"}),
            json!({"FactRecID": "C", "Amount": "7"}),
        ]);
        let split = r.split_amount(Some("C"), Some(2.0)).unwrap();
        assert_eq!(split.source_id, "Updated-3-C");
        assert_eq!(split.new_id, "New-5-C");
    }

    #[test]
    fn test_replace_records_keeps_counters() {
        let mut r = reconciler(vec![json!({"FactRecID": "A", "Amount": "1"})]);
        r.record_edited("A", &Map::new()).unwrap();
        r.replace_records(vec![rec(json!({"FactRecID": "A", "Amount": "1"}))]);
        assert!(!r.is_converted("A"));
        let report = r.record_edited("A", &Map::new()).unwrap();
        assert_eq!(
            report.outcome,
            EditOutcome::Converted {
                from: "A".into(),
                to: "Updated-2-A".into()
            }
        );
    }

    #[test]
    fn test_numeric_identifiers() {
        let mut r = reconciler(vec![json!({"FactRecID": 42, "Amount": 10})]);
        let report = r.record_edited("42", &Map::new()).unwrap();
        assert_eq!(
            report.outcome,
            EditOutcome::Converted {
                from: "42".into(),
                to: "Updated-1-42".into()
            }
        );
    }
}
