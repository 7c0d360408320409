//! Presentation adapter.
//!
//! Everything between the reconciled rows and the embedded grid library:
//! - Amount formatting and ordering for currency columns
//! - Lock mode and row style rules
//! - The grid options object
//! - The [`GridAdapter`] seam that transactions and save/export go through

mod compare;
mod extract;
mod format;
mod grid;
#[cfg(target_arch = "wasm32")]
pub(crate) mod js;
mod lock;
mod options;
mod style;

pub use compare::{compare_amounts, sort_amounts};
pub use extract::{extract, SavePolicy};
pub use format::{format_amount, format_amount_number};
pub use grid::{GridAdapter, MemoryGrid};
#[cfg(target_arch = "wasm32")]
pub use js::JsGridApi;
pub use lock::{EditMode, LockPolarity};
pub use options::*;
pub use style::{row_class, row_class_rules, NEW_ROW_CLASS, UPDATED_ROW_CLASS};
