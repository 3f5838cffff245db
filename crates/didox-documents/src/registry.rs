//! # Builder Registry
//!
//! Static table from [`DocumentType`] to a boxed builder factory, for
//! callers that pick the document kind at runtime (from configuration, a
//! queue message, or a CLI argument in a downstream tool). Compile-time
//! callers use the typed factories in [`crate::builders`] instead.

use didox_core::{DocumentType, ValidationError};

use crate::builder::DocumentBuilder;
use crate::builders;
use crate::payload::Payload;

/// Creates a builder seeded with an optional initial partial payload.
pub type BuilderFactory = fn(Option<Payload>) -> Box<dyn DocumentBuilder>;

/// One row of [`BUILDER_REGISTRY`].
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub document: DocumentType,
    pub factory: BuilderFactory,
}

/// Every document type with its factory, ordered by wire code.
pub static BUILDER_REGISTRY: &[RegistryEntry] = &[
    RegistryEntry { document: DocumentType::Arbitrary, factory: boxed_arbitrary },
    RegistryEntry { document: DocumentType::Invoice, factory: boxed_invoice },
    RegistryEntry { document: DocumentType::Act, factory: boxed_act },
    RegistryEntry { document: DocumentType::Empowerment, factory: boxed_empowerment },
    RegistryEntry { document: DocumentType::Contract, factory: boxed_contract },
    RegistryEntry { document: DocumentType::PharmacyInvoice, factory: boxed_pharmacy_invoice },
    RegistryEntry { document: DocumentType::MultiPartyArbitrary, factory: boxed_multi_party },
    RegistryEntry { document: DocumentType::LetterToAuthority, factory: boxed_letter },
    RegistryEntry { document: DocumentType::HybridInvoice, factory: boxed_hybrid_invoice },
    RegistryEntry { document: DocumentType::TransportWaybill, factory: boxed_waybill },
    RegistryEntry { document: DocumentType::VerificationAct, factory: boxed_verification_act },
    RegistryEntry { document: DocumentType::AcceptanceTransfer, factory: boxed_acceptance_transfer },
    RegistryEntry { document: DocumentType::FoundersProtocol, factory: boxed_founders_protocol },
];

fn boxed_arbitrary(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::arbitrary(initial))
}

fn boxed_invoice(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::invoice(initial))
}

fn boxed_act(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::act(initial))
}

fn boxed_empowerment(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::empowerment(initial))
}

fn boxed_contract(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::contract(initial))
}

fn boxed_pharmacy_invoice(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::pharmacy_invoice(initial))
}

fn boxed_multi_party(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::multi_party(initial))
}

fn boxed_letter(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::letter(initial))
}

fn boxed_hybrid_invoice(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::hybrid_invoice(initial))
}

fn boxed_waybill(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::waybill(initial))
}

fn boxed_verification_act(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::verification_act(initial))
}

fn boxed_acceptance_transfer(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::acceptance_transfer(initial))
}

fn boxed_founders_protocol(initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    Box::new(builders::founders_protocol(initial))
}

/// Boxed builder for `document`.
pub fn builder_for(document: DocumentType, initial: Option<Payload>) -> Box<dyn DocumentBuilder> {
    match BUILDER_REGISTRY.iter().find(|entry| entry.document == document) {
        Some(entry) => (entry.factory)(initial),
        // Unreachable while the table lists every variant.
        None => Box::new(builders::PassthroughBuilder::new(document, initial)),
    }
}

/// Boxed builder by registry name (`"invoice"`) or wire code (`"002"`).
///
/// # Errors
///
/// Returns [`ValidationError::UnknownDocumentType`] when the name matches
/// no catalogue entry.
pub fn builder_by_name(name: &str, initial: Option<Payload>) -> Result<Box<dyn DocumentBuilder>, ValidationError> {
    let document: DocumentType = name.parse()?;
    Ok(builder_for(document, initial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use serde_json::json;

    #[test]
    fn registry_covers_every_document_type() {
        assert_eq!(BUILDER_REGISTRY.len(), DocumentType::all().len());
        for (entry, document) in BUILDER_REGISTRY.iter().zip(DocumentType::all()) {
            assert_eq!(entry.document, *document);
            assert_eq!((entry.factory)(None).document_type(), *document);
        }
    }

    #[test]
    fn lookup_by_name_and_code() {
        assert_eq!(builder_by_name("act", None).unwrap().document_type(), DocumentType::Act);
        assert_eq!(
            builder_by_name("041", None).unwrap().document_type(),
            DocumentType::TransportWaybill
        );
        let err = builder_by_name("receipt", None).err().unwrap();
        assert_eq!(err, ValidationError::UnknownDocumentType("receipt".into()));
    }

    #[test]
    fn transforming_builders_validate_through_the_trait() {
        let builder = builder_for(DocumentType::Empowerment, None);
        assert!(matches!(
            builder.build(),
            Err(BuildError::MissingRequiredSection { section: "header", .. })
        ));
    }

    #[test]
    fn passthrough_builders_accept_raw_through_the_trait() {
        let mut builder = builder_for(DocumentType::HybridInvoice, None);
        builder.merge_raw(json!({"FacturaId": "abc"}));
        assert_eq!(builder.build().unwrap()["FacturaId"], json!("abc"));
    }

    #[test]
    fn initial_partial_is_forwarded() {
        let initial = Payload::from_value(json!({"Note": 1})).unwrap();
        let builder = builder_for(DocumentType::Contract, Some(initial));
        assert_eq!(builder.build().unwrap()["Note"], json!(1));
    }
}
