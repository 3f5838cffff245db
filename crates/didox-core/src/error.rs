//! # Error Types
//!
//! Validation failures for the scalar formats the platform requires.
//! All errors use `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// Errors from validating identifier and catalogue values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// TIN is not a 9-digit number.
    #[error("invalid TIN: \"{0}\" (expected 9 digits)")]
    InvalidTin(String),

    /// PINFL is not a 14-digit number.
    #[error("invalid PINFL: \"{0}\" (expected 14 digits)")]
    InvalidPinfl(String),

    /// Value is neither a TIN nor a PINFL.
    #[error("invalid taxpayer identifier: \"{0}\" (expected 9-digit TIN or 14-digit PINFL)")]
    InvalidTinOrPinfl(String),

    /// Date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Document type code or name is not in the catalogue.
    #[error("unknown document type: \"{0}\"")]
    UnknownDocumentType(String),

    /// Locale tag is not supported by the platform.
    #[error("unknown locale: \"{0}\" (expected ru, uz or en)")]
    UnknownLocale(String),
}
