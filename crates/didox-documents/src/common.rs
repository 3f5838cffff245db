//! Draft blocks and wire blocks shared by several builders.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Reference to the contract a document is issued under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractRef {
    pub number: String,
    pub date: String,
}

/// Document-level VAT switch used by invoices and acts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VatFlags {
    pub has_vat: bool,
}

/// Document and party block shared by the arbitrary document kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentHeader {
    pub number: String,
    pub date: String,
    pub name: String,
}

/// PDF attachment for arbitrary documents.
///
/// Sent as a `data:application/pdf;base64,` URL. Base64 text that already
/// carries the prefix is sent unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PdfContent {
    /// Standard-alphabet base64 text.
    Base64(String),
    /// Raw file bytes.
    Bytes(Vec<u8>),
}

impl PdfContent {
    /// The `data:` URL placed in the payload's `Data` field.
    pub fn data_url(&self) -> String {
        match self {
            Self::Base64(text) if text.starts_with(PDF_DATA_URL_PREFIX) => text.clone(),
            Self::Base64(text) => format!("{PDF_DATA_URL_PREFIX}{text}"),
            Self::Bytes(bytes) => format!("{PDF_DATA_URL_PREFIX}{}", STANDARD.encode(bytes)),
        }
    }
}

impl From<Vec<u8>> for PdfContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for PdfContent {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for PdfContent {
    fn from(text: String) -> Self {
        Self::Base64(text)
    }
}

impl From<&str> for PdfContent {
    fn from(text: &str) -> Self {
        Self::Base64(text.to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DocumentWire<'a> {
    pub document_no: &'a str,
    pub document_date: &'a str,
    pub document_name: &'a str,
}

impl<'a> From<&'a DocumentHeader> for DocumentWire<'a> {
    fn from(header: &'a DocumentHeader) -> Self {
        Self {
            document_no: &header.number,
            document_date: &header.date,
            document_name: &header.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContractDoc<'a> {
    pub contract_no: &'a str,
    pub contract_date: &'a str,
}

impl ContractDoc<'static> {
    /// Block with blank number and date, for documents that always carry
    /// one.
    pub(crate) const EMPTY: Self = Self {
        contract_no: "",
        contract_date: "",
    };
}

impl<'a> From<&'a ContractRef> for ContractDoc<'a> {
    fn from(contract: &'a ContractRef) -> Self {
        Self {
            contract_no: &contract.number,
            contract_date: &contract.date,
        }
    }
}

/// Optional draft string, defaulting to `""` on the wire.
pub(crate) fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
