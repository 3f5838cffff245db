//! # didox-documents -- Document Builders
//!
//! Turns developer-friendly drafts of business documents into the exact
//! JSON payloads the Didox platform accepts for each document type code.
//!
//! ## Architecture
//!
//! - [`builder`]: the [`DocumentBuilder`] trait and [`PayloadAccumulator`],
//!   the raw-override state every builder composes.
//! - [`payload`]: the [`Payload`] wire type and the shallow and deep merge
//!   strategies.
//! - [`builders`]: one builder per document kind, plus typed factories.
//! - [`registry`]: runtime lookup of boxed builders by type, name or code.
//!
//! Builders are synchronous and do no I/O. Setters never fail; everything
//! is checked in `build()`, which returns a fresh payload each call.
//!
//! ```
//! use didox_documents::builders::act::{ActHeader, ActParty, ActProduct};
//! use didox_documents::common::VatFlags;
//! use didox_documents::{builders, DocumentBuilder};
//!
//! let payload = builders::act(None)
//!     .header(ActHeader { number: "1".into(), date: "2025-02-07".into(), text: "Works".into() })
//!     .seller(ActParty { tin: "123456789".into(), name: "S".into(), ..Default::default() })
//!     .buyer(ActParty { tin: "987654321".into(), name: "B".into(), ..Default::default() })
//!     .product(ActProduct { name: "Repair".into(), count: 10.0, price: 1000.0, vat_rate: Some(12.0), ..Default::default() })
//!     .flags(VatFlags { has_vat: true })
//!     .build()
//!     .unwrap();
//! assert_eq!(payload["ProductList"]["Products"][0]["TotalSum"], "11200.00");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `didox-core` internally.
//! - No `.unwrap()` outside tests.

mod amount;
pub mod builder;
pub mod builders;
pub mod common;
pub mod error;
pub mod payload;
pub mod registry;

pub use builder::{DocumentBuilder, PayloadAccumulator};
pub use common::{ContractRef, DocumentHeader, PdfContent, VatFlags};
pub use error::BuildError;
pub use payload::{deep_merge, shallow_merge, MergeStrategy, Payload};
pub use registry::{builder_by_name, builder_for, BuilderFactory, RegistryEntry, BUILDER_REGISTRY};
