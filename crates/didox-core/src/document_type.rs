//! # Document Type Catalogue
//!
//! Defines the `DocumentType` enum: every document kind the platform
//! accepts, with its three-digit wire code. The code is the path segment of
//! `POST /v1/documents/{code}/create`.
//!
//! Five codes are reserved: the platform accepts them but this workspace
//! only offers pass-through builders for them (raw payload in, raw payload
//! out). [`DocumentType::has_transform`] tells the two groups apart.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// All document kinds known to the client.
///
/// | Code | Variant | Registry name |
/// |------|---------|---------------|
/// | 000 | Arbitrary | `arbitrary` |
/// | 002 | Invoice | `invoice` |
/// | 005 | Act | `act` |
/// | 006 | Empowerment | `empowerment` |
/// | 007 | Contract | `contract` |
/// | 008 | PharmacyInvoice | `pharmacy_invoice` |
/// | 010 | MultiPartyArbitrary | `multi_party_arbitrary` |
/// | 013 | LetterToAuthority | `letter_to_authority` |
/// | 023 | HybridInvoice | `hybrid_invoice` |
/// | 041 | TransportWaybill | `transport_waybill` |
/// | 052 | VerificationAct | `verification_act` |
/// | 054 | AcceptanceTransfer | `acceptance_transfer` |
/// | 075 | FoundersProtocol | `founders_protocol` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Free-form document with a PDF body between two parties.
    Arbitrary,
    /// Tax invoice (factura).
    Invoice,
    /// Act of completed works.
    Act,
    /// Power of attorney for receiving goods.
    Empowerment,
    /// Contract.
    Contract,
    /// Pharmacy invoice.
    PharmacyInvoice,
    /// Free-form document with a PDF body between an owner and several clients.
    MultiPartyArbitrary,
    /// Letter to the tax authority.
    LetterToAuthority,
    /// Hybrid (paper-electronic) invoice.
    HybridInvoice,
    /// Transport waybill (TTN).
    TransportWaybill,
    /// Act of mutual settlements verification.
    VerificationAct,
    /// Acceptance-transfer act.
    AcceptanceTransfer,
    /// Protocol of the founders' meeting.
    FoundersProtocol,
}

impl DocumentType {
    /// Every document type, ordered by wire code.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::Arbitrary,
            Self::Invoice,
            Self::Act,
            Self::Empowerment,
            Self::Contract,
            Self::PharmacyInvoice,
            Self::MultiPartyArbitrary,
            Self::LetterToAuthority,
            Self::HybridInvoice,
            Self::TransportWaybill,
            Self::VerificationAct,
            Self::AcceptanceTransfer,
            Self::FoundersProtocol,
        ]
    }

    /// Three-digit wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arbitrary => "000",
            Self::Invoice => "002",
            Self::Act => "005",
            Self::Empowerment => "006",
            Self::Contract => "007",
            Self::PharmacyInvoice => "008",
            Self::MultiPartyArbitrary => "010",
            Self::LetterToAuthority => "013",
            Self::HybridInvoice => "023",
            Self::TransportWaybill => "041",
            Self::VerificationAct => "052",
            Self::AcceptanceTransfer => "054",
            Self::FoundersProtocol => "075",
        }
    }

    /// Registry name in snake_case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arbitrary => "arbitrary",
            Self::Invoice => "invoice",
            Self::Act => "act",
            Self::Empowerment => "empowerment",
            Self::Contract => "contract",
            Self::PharmacyInvoice => "pharmacy_invoice",
            Self::MultiPartyArbitrary => "multi_party_arbitrary",
            Self::LetterToAuthority => "letter_to_authority",
            Self::HybridInvoice => "hybrid_invoice",
            Self::TransportWaybill => "transport_waybill",
            Self::VerificationAct => "verification_act",
            Self::AcceptanceTransfer => "acceptance_transfer",
            Self::FoundersProtocol => "founders_protocol",
        }
    }

    /// Look a type up by its wire code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownDocumentType`] for codes outside
    /// the catalogue.
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| ValidationError::UnknownDocumentType(code.to_string()))
    }

    /// Whether a builder transforms a draft for this type. Reserved types
    /// only pass raw payloads through.
    pub fn has_transform(&self) -> bool {
        !matches!(
            self,
            Self::Contract
                | Self::PharmacyInvoice
                | Self::HybridInvoice
                | Self::VerificationAct
                | Self::AcceptanceTransfer
        )
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the registry name or the wire code.
impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s || t.code() == s)
            .ok_or_else(|| ValidationError::UnknownDocumentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_and_three_digits() {
        let codes: HashSet<&str> = DocumentType::all().iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), DocumentType::all().len());
        assert!(codes.iter().all(|c| c.len() == 3 && c.chars().all(|ch| ch.is_ascii_digit())));
    }

    #[test]
    fn known_codes() {
        assert_eq!(DocumentType::Invoice.code(), "002");
        assert_eq!(DocumentType::Act.code(), "005");
        assert_eq!(DocumentType::Empowerment.code(), "006");
        assert_eq!(DocumentType::MultiPartyArbitrary.code(), "010");
        assert_eq!(DocumentType::LetterToAuthority.code(), "013");
        assert_eq!(DocumentType::FoundersProtocol.code(), "075");
        assert_eq!(DocumentType::Arbitrary.code(), "000");
        assert_eq!(DocumentType::TransportWaybill.code(), "041");
        assert_eq!(DocumentType::HybridInvoice.code(), "023");
        assert_eq!(DocumentType::PharmacyInvoice.code(), "008");
        assert_eq!(DocumentType::Contract.code(), "007");
        assert_eq!(DocumentType::VerificationAct.code(), "052");
        assert_eq!(DocumentType::AcceptanceTransfer.code(), "054");
    }

    #[test]
    fn from_code_roundtrip() {
        for t in DocumentType::all() {
            assert_eq!(DocumentType::from_code(t.code()).unwrap(), *t);
        }
        assert!(DocumentType::from_code("999").is_err());
    }

    #[test]
    fn from_str_accepts_name_or_code() {
        assert_eq!("invoice".parse::<DocumentType>().unwrap(), DocumentType::Invoice);
        assert_eq!("041".parse::<DocumentType>().unwrap(), DocumentType::TransportWaybill);
        assert!("waybill".parse::<DocumentType>().is_err());
    }

    #[test]
    fn reserved_types_have_no_transform() {
        let reserved: Vec<_> = DocumentType::all()
            .iter()
            .filter(|t| !t.has_transform())
            .map(|t| t.code())
            .collect();
        assert_eq!(reserved, vec!["007", "008", "023", "052", "054"]);
    }

    #[test]
    fn serde_uses_snake_case_name() {
        let json = serde_json::to_string(&DocumentType::FoundersProtocol).unwrap();
        assert_eq!(json, "\"founders_protocol\"");
    }
}
