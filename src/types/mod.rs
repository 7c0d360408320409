//! Data types shared by the ingestor, reconciler and presentation adapter.

mod column;
mod identity;
mod record;
mod transaction;

pub use column::*;
pub use identity::*;
pub use record::*;
pub use transaction::*;

/// Helper function for serde skip_serializing_if
pub(crate) fn is_false(b: &bool) -> bool {
    !b
}
