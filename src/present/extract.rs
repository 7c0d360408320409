//! Save-time extraction of the grid's live rows.

use serde::{Deserialize, Serialize};

use crate::types::{IdTag, Record, RecordId};

/// Which rows the save payload carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavePolicy {
    /// Every row the grid holds.
    AllRows,
    /// Only rows tagged New or Updated.
    #[default]
    ChangedOnly,
}

/// Select the rows to hand to the host under `policy`.
#[must_use]
pub fn extract(rows: Vec<Record>, policy: SavePolicy, identity_field: &str) -> Vec<Record> {
    match policy {
        SavePolicy::AllRows => rows,
        SavePolicy::ChangedOnly => rows
            .into_iter()
            .filter(|r| {
                r.id_in(identity_field)
                    .is_some_and(|id| RecordId::parse(&id).tag() != IdTag::Original)
            })
            .collect(),
    }
}
