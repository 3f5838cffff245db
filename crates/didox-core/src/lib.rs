#![deny(missing_docs)]

//! # didox-core -- Foundational Types for the Didox Client
//!
//! Leaf crate of the workspace. Defines the identifier and catalogue types
//! that the document builders and the HTTP client share.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for taxpayer identifiers.** `Tin` (9 digits) and
//!    `Pinfl` (14 digits) validate at construction and at deserialization.
//!
//! 2. **Calendar dates as `YYYY-MM-DD`.** `DocumentDate` wraps
//!    `chrono::NaiveDate` and renders the only date format the platform
//!    accepts.
//!
//! 3. **Single `DocumentType` enum.** One definition of every type code the
//!    platform accepts, including the reserved codes that only have
//!    pass-through builders.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `didox-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document_type;
pub mod error;
pub mod identity;
pub mod locale;
pub mod temporal;

pub use document_type::DocumentType;
pub use error::ValidationError;
pub use identity::{Pinfl, Tin, TinOrPinfl};
pub use locale::Locale;
pub use temporal::DocumentDate;
