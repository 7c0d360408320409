//! Lock mode: whether cells are editable and row actions are shown.
//!
//! The host passes `gridLock` as a `"true"`/`"false"` string, and earlier
//! revisions of the control disagreed on which value unlocks the grid. The
//! polarity is therefore never guessed: the integrator names it explicitly
//! through [`LockPolarity`].

use serde::{Deserialize, Serialize};

/// Which `gridLock` value makes the grid editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockPolarity {
    /// `gridLock == "false"` unlocks; `"true"` locks.
    EditableWhenFalse,
    /// `gridLock == "true"` unlocks; `"false"` locks.
    EditableWhenTrue,
}

/// Effective edit affordances for the current `gridLock` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMode {
    /// Cells accept edits.
    pub cells_editable: bool,
    /// Split / save controls are visible.
    pub show_row_actions: bool,
}

impl EditMode {
    /// Everything read-only.
    pub const LOCKED: Self = Self {
        cells_editable: false,
        show_row_actions: false,
    };

    /// Everything editable.
    pub const UNLOCKED: Self = Self {
        cells_editable: true,
        show_row_actions: true,
    };

    /// Resolve the host flag under `polarity`.
    ///
    /// A missing or unrecognized flag locks the grid.
    #[must_use]
    pub fn resolve(grid_lock: Option<&str>, polarity: LockPolarity) -> Self {
        let flag = match grid_lock.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                log::warn!("unrecognized gridLock value {other:?}; grid stays locked");
                return Self::LOCKED;
            }
            None => return Self::LOCKED,
        };

        let editable = match polarity {
            LockPolarity::EditableWhenFalse => !flag,
            LockPolarity::EditableWhenTrue => flag,
        };
        if editable {
            Self::UNLOCKED
        } else {
            Self::LOCKED
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.cells_editable
    }
}
