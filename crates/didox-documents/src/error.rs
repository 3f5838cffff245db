//! # Build Errors
//!
//! Failures raised by `build()` when a draft is incomplete. Setters never
//! fail and the raw escape hatch is never validated, so every variant here
//! is a local programmer error: fix the draft and build again.

use didox_core::DocumentType;
use thiserror::Error;

/// Why a builder refused to produce a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A mandatory block (header, party, transport, totals, …) was never set.
    #[error("{document}: required section `{section}` is not set")]
    MissingRequiredSection {
        /// Document being built.
        document: DocumentType,
        /// Draft section name.
        section: &'static str,
    },

    /// A mandatory repeated collection has no entries.
    #[error("{document}: required list `{list}` is empty")]
    EmptyRequiredList {
        /// Document being built.
        document: DocumentType,
        /// Draft list name.
        list: &'static str,
    },

    /// An entry of a repeated collection lacks a mandatory field.
    #[error("{document}: `{list}[{index}]` is missing `{field}`")]
    MissingRequiredListItemField {
        /// Document being built.
        document: DocumentType,
        /// Draft list name.
        list: &'static str,
        /// Zero-based position of the offending entry.
        index: usize,
        /// Missing field name.
        field: &'static str,
    },

    /// A waybill product group failed its own validation when it was added.
    #[error("{document}: product group {index} is invalid: {source}")]
    InvalidProductGroup {
        /// Document being built.
        document: DocumentType,
        /// Zero-based position of the group.
        index: usize,
        /// The sub-builder's failure.
        source: Box<BuildError>,
    },

    /// A draft amount, or a sum derived from it, is not a finite value
    /// within the decimal range.
    #[error("{document}: amount `{field}` is out of range")]
    AmountOutOfRange {
        /// Document being built.
        document: DocumentType,
        /// Draft field, or the derived sum, that overflowed.
        field: &'static str,
    },

    /// The generated payload could not be encoded as a JSON object.
    #[error("failed to encode {document} payload: {reason}")]
    Encoding {
        /// Document being built.
        document: DocumentType,
        /// Encoder message.
        reason: String,
    },
}

impl BuildError {
    /// Document type the failure belongs to.
    pub fn document(&self) -> DocumentType {
        match self {
            Self::MissingRequiredSection { document, .. }
            | Self::EmptyRequiredList { document, .. }
            | Self::MissingRequiredListItemField { document, .. }
            | Self::InvalidProductGroup { document, .. }
            | Self::AmountOutOfRange { document, .. }
            | Self::Encoding { document, .. } => *document,
        }
    }
}

/// Return the set section or fail with [`BuildError::MissingRequiredSection`].
pub(crate) fn require<'a, T>(
    document: DocumentType,
    section: &'static str,
    value: &'a Option<T>,
) -> Result<&'a T, BuildError> {
    value
        .as_ref()
        .ok_or(BuildError::MissingRequiredSection { document, section })
}

/// Fail with [`BuildError::EmptyRequiredList`] when `items` is empty.
pub(crate) fn require_items<'a, T>(
    document: DocumentType,
    list: &'static str,
    items: &'a [T],
) -> Result<&'a [T], BuildError> {
    if items.is_empty() {
        return Err(BuildError::EmptyRequiredList { document, list });
    }
    Ok(items)
}

/// Fail with [`BuildError::MissingRequiredListItemField`] for the first
/// entry whose `field` is blank.
pub(crate) fn require_item_field<T>(
    document: DocumentType,
    list: &'static str,
    field: &'static str,
    items: &[T],
    get: impl Fn(&T) -> &str,
) -> Result<(), BuildError> {
    match items.iter().position(|item| get(item).trim().is_empty()) {
        Some(index) => Err(BuildError::MissingRequiredListItemField {
            document,
            list,
            index,
            field,
        }),
        None => Ok(()),
    }
}
