//! # Concrete Document Builders
//!
//! One module per document kind, plus typed factory functions. Each factory
//! takes an optional initial partial payload that seeds the builder's raw
//! overrides.
//!
//! | Factory | Code | Raw merge |
//! |---------|------|-----------|
//! | [`invoice()`] | `002` | shallow |
//! | [`act()`] | `005` | shallow |
//! | [`waybill()`] | `041` | shallow |
//! | [`empowerment()`] | `006` | deep |
//! | [`multi_party()`] | `010` | deep |
//! | [`letter()`] | `013` | deep |
//! | [`founders_protocol()`] | `075` | deep |
//! | [`arbitrary()`] | `000` | deep |
//! | [`hybrid_invoice()`], [`pharmacy_invoice()`], [`contract()`], [`verification_act()`], [`acceptance_transfer()`] | `023` `008` `007` `052` `054` | initial + raw only |

pub mod act;
pub mod arbitrary;
pub mod empowerment;
pub mod founders_protocol;
pub mod invoice;
pub mod letter;
pub mod multi_party;
pub mod passthrough;
pub mod waybill;

use didox_core::DocumentType;

use crate::payload::Payload;

pub use act::ActBuilder;
pub use arbitrary::ArbitraryBuilder;
pub use empowerment::EmpowermentBuilder;
pub use founders_protocol::FoundersProtocolBuilder;
pub use invoice::InvoiceBuilder;
pub use letter::LetterBuilder;
pub use multi_party::MultiPartyBuilder;
pub use passthrough::PassthroughBuilder;
pub use waybill::{ProductGroupBuilder, WaybillBuilder};

/// Invoice builder (`002`).
pub fn invoice(initial: Option<Payload>) -> InvoiceBuilder {
    InvoiceBuilder::new(initial)
}

/// Act of completed works builder (`005`).
pub fn act(initial: Option<Payload>) -> ActBuilder {
    ActBuilder::new(initial)
}

/// Transport waybill builder (`041`).
pub fn waybill(initial: Option<Payload>) -> WaybillBuilder {
    WaybillBuilder::new(initial)
}

/// Empowerment builder (`006`).
pub fn empowerment(initial: Option<Payload>) -> EmpowermentBuilder {
    EmpowermentBuilder::new(initial)
}

/// Multi-party arbitrary document builder (`010`).
pub fn multi_party(initial: Option<Payload>) -> MultiPartyBuilder {
    MultiPartyBuilder::new(initial)
}

/// Letter to the tax authority builder (`013`).
pub fn letter(initial: Option<Payload>) -> LetterBuilder {
    LetterBuilder::new(initial)
}

/// Founders' meeting protocol builder (`075`).
pub fn founders_protocol(initial: Option<Payload>) -> FoundersProtocolBuilder {
    FoundersProtocolBuilder::new(initial)
}

/// Arbitrary document builder (`000`).
pub fn arbitrary(initial: Option<Payload>) -> ArbitraryBuilder {
    ArbitraryBuilder::new(initial)
}

/// Hybrid invoice (`023`): initial and raw data only.
pub fn hybrid_invoice(initial: Option<Payload>) -> PassthroughBuilder {
    PassthroughBuilder::new(DocumentType::HybridInvoice, initial)
}

/// Pharmacy invoice (`008`): initial and raw data only.
pub fn pharmacy_invoice(initial: Option<Payload>) -> PassthroughBuilder {
    PassthroughBuilder::new(DocumentType::PharmacyInvoice, initial)
}

/// Contract (`007`): initial and raw data only.
pub fn contract(initial: Option<Payload>) -> PassthroughBuilder {
    PassthroughBuilder::new(DocumentType::Contract, initial)
}

/// Verification act (`052`): initial and raw data only.
pub fn verification_act(initial: Option<Payload>) -> PassthroughBuilder {
    PassthroughBuilder::new(DocumentType::VerificationAct, initial)
}

/// Acceptance-transfer act (`054`): initial and raw data only.
pub fn acceptance_transfer(initial: Option<Payload>) -> PassthroughBuilder {
    PassthroughBuilder::new(DocumentType::AcceptanceTransfer, initial)
}
