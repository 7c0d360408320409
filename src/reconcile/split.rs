//! Transfer validation and audit annotations for amount splits.

use std::num::FpCategory;

use serde_json::Value;

use crate::amount::to_fixed2;
use crate::error::ValidationError;
use crate::types::Record;

/// Marker that identifies an audit annotation in the free-text field.
pub const ANNOTATION_MARKER: &str = "Original Amount:";

/// Check the transfer amount the user typed.
///
/// # Errors
/// Missing, zero and non-finite amounts are rejected.
pub fn validate_transfer(transfer: Option<f64>) -> Result<f64, ValidationError> {
    let transfer = transfer.ok_or(ValidationError::MissingTransferAmount)?;
    match transfer.classify() {
        FpCategory::Nan | FpCategory::Infinite => Err(ValidationError::NonFiniteTransferAmount),
        FpCategory::Zero => Err(ValidationError::ZeroTransferAmount),
        FpCategory::Normal | FpCategory::Subnormal => Ok(transfer),
    }
}

/// Apply the balance rules and return the amount left on the source row.
///
/// With `remainder = original - transfer`, a split is rejected when a
/// negative balance is pushed further negative past its own magnitude, or
/// when a positive transfer is larger than a negative balance's magnitude
/// (`original + transfer > 0`). A transfer that exactly cancels the
/// balance is allowed.
///
/// # Errors
/// [`ValidationError::Overdraw`] or [`ValidationError::SignFlip`].
pub fn check_split(original: f64, transfer: f64) -> Result<f64, ValidationError> {
    let remainder = original - transfer;

    if original < 0.0 && transfer < 0.0 && remainder.abs() > original.abs() {
        return Err(ValidationError::Overdraw { original, transfer });
    }
    if original < 0.0 && transfer > 0.0 && original + transfer > 0.0 {
        return Err(ValidationError::SignFlip { original, transfer });
    }

    Ok(remainder)
}

/// Append the pre-split amount to `field` unless it is already annotated.
///
/// Returns true when the record changed.
pub fn annotate(record: &mut Record, field: &str, pre_split: f64) -> bool {
    let existing = record.text_in(field);
    if existing.contains(ANNOTATION_MARKER) {
        return false;
    }

    let note = format!("{ANNOTATION_MARKER} {}", to_fixed2(pre_split));
    let text = if existing.trim().is_empty() {
        note
    } else {
        format!("{} {note}", existing.trim_end())
    };
    record.set(field, Value::String(text));
    true
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
    use test_case::test_case;

    #[test_case(-100.0, -50.0 => Ok(-50.0) ; "negative shrinks toward zero")]
    #[test_case(-100.0, -110.0 => Ok(10.0) ; "small crossing stays within magnitude")]
    #[test_case(-100.0, -250.0 => Err(ValidationError::Overdraw { original: -100.0, transfer: -250.0 }) ; "overdraw")]
    #[test_case(-100.0, 30.0 => Ok(-130.0) ; "more negative is allowed")]
    #[test_case(-100.0, 150.0 => Err(ValidationError::SignFlip { original: -100.0, transfer: 150.0 }) ; "sign flip")]
    #[test_case(-100.0, 100.0 => Ok(-200.0) ; "transfer equal to magnitude")]
    #[test_case(-100.0, 100.5 => Err(ValidationError::SignFlip { original: -100.0, transfer: 100.5 }) ; "just past magnitude")]
    #[test_case(100.0, 30.0 => Ok(70.0) ; "positive balance")]
    #[test_case(100.0, 250.0 => Ok(-150.0) ; "positive balance is never rejected")]
    fn test_check_split(original: f64, transfer: f64) -> Result<f64, ValidationError> {
        check_split(original, transfer)
    }

    #[test]
    fn test_validate_transfer() {
        assert_eq!(validate_transfer(Some(30.0)), Ok(30.0));
        assert_eq!(
            validate_transfer(None),
            Err(ValidationError::MissingTransferAmount)
        );
        assert_eq!(
            validate_transfer(Some(0.0)),
            Err(ValidationError::ZeroTransferAmount)
        );
        assert_eq!(
            validate_transfer(Some(-0.0)),
            Err(ValidationError::ZeroTransferAmount)
        );
        assert_eq!(
            validate_transfer(Some(f64::NAN)),
            Err(ValidationError::NonFiniteTransferAmount)
        );
    }

    #[test]
    fn test_annotate_once() {
        let mut record = Record::new();
        record.set("Comments", Value::String("checked".into()));

        assert!(annotate(&mut record, "Comments", 100.0));
        assert_eq!(record.text_in("Comments"), "checked Original Amount: 100.00");

        assert!(!annotate(&mut record, "Comments", 70.0));
        assert_eq!(record.text_in("Comments"), "checked Original Amount: 100.00");
    }

    #[test]
    fn test_annotate_missing_field() {
        let mut record = Record::new();
        assert!(annotate(&mut record, "Comments", -40.0));
        assert_eq!(record.text_in("Comments"), "Original Amount: -40.00");
    }
}
