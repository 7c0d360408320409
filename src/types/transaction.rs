use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Record;

/// A batch of row changes for the grid library's transaction API.
///
/// Serializes to the library's `{ remove, update, add, addIndex }` shape.
/// `remove` entries only carry the identity field, which is all the
/// library needs to find the node through its row-id callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowTransaction {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub remove: Vec<Record>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub update: Vec<Record>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub add: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub add_index: Option<usize>,
}

impl RowTransaction {
    /// True when applying the transaction would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.update.is_empty() && self.add.is_empty()
    }

    /// Queue removal of the row keyed `id`.
    pub fn push_remove(&mut self, id_field: &str, id: &str) {
        let mut stub = Record::new();
        stub.set(id_field, Value::String(id.to_string()));
        self.remove.push(stub);
    }
}
