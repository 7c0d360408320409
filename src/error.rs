//! Structured error types for recon-grid.

use std::fmt;

/// A split request the user must correct before anything is mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No row was selected as the split source.
    NoRowSelected,
    /// The transfer amount field was left empty.
    MissingTransferAmount,
    /// The transfer amount is zero.
    ZeroTransferAmount,
    /// The transfer amount is NaN or infinite.
    NonFiniteTransferAmount,
    /// The source row's amount field does not hold a number.
    NonNumericAmount { id: String },
    /// Negative balance overdrawn further in the negative direction.
    Overdraw { original: f64, transfer: f64 },
    /// Positive transfer would flip a negative balance positive.
    SignFlip { original: f64, transfer: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRowSelected => write!(f, "Select exactly one row to transfer from"),
            Self::MissingTransferAmount => write!(f, "Enter a transfer amount"),
            Self::ZeroTransferAmount => write!(f, "Transfer amount cannot be zero"),
            Self::NonFiniteTransferAmount => write!(f, "Transfer amount must be a number"),
            Self::NonNumericAmount { id } => {
                write!(f, "Row {id} has no numeric amount to transfer from")
            }
            Self::Overdraw { original, transfer } => write!(
                f,
                "Transferring {transfer:.2} would overdraw the balance of {original:.2}"
            ),
            Self::SignFlip { original, transfer } => write!(
                f,
                "Transferring {transfer:.2} would flip the balance of {original:.2} positive"
            ),
        }
    }
}

/// All errors that can occur while ingesting, reconciling and presenting rows.
#[derive(Debug, thiserror::Error)]
pub enum ReconGridError {
    /// Malformed inbound dataset.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON decoding error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid split input.
    #[error("{0}")]
    Validation(ValidationError),

    /// An identifier that is no longer present in the row collection.
    #[error("Unknown record: {0}")]
    UnknownRecord(String),

    /// A mutation was attempted while the grid is read-only.
    #[error("Grid is locked")]
    Locked,

    /// The embedded grid library rejected a call.
    #[error("Grid error: {0}")]
    Grid(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

impl ReconGridError {
    /// True for the error kinds the parse boundary swallows.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Json(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReconGridError>;

impl From<ValidationError> for ReconGridError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<String> for ReconGridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ReconGridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ReconGridError> for wasm_bindgen::JsValue {
    fn from(e: ReconGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
