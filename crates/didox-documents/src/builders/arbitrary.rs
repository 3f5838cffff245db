//! # Arbitrary document (code `000`)
//!
//! A two-party document whose body is an attached PDF. Raw overrides merge
//! deeply.

use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef, DocumentHeader, DocumentWire, PdfContent};
use crate::error::{require, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::Arbitrary;

/// Sending or receiving party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArbitraryParty {
    pub tin: String,
    pub name: String,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct ArbitraryDraft {
    header: Option<DocumentHeader>,
    contract: Option<ContractRef>,
    seller: Option<ArbitraryParty>,
    buyer: Option<ArbitraryParty>,
    pdf: Option<PdfContent>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ArbitraryPayload<'a> {
    document: DocumentWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_doc: Option<ContractDoc<'a>>,
    seller_tin: &'a str,
    seller_name: &'a str,
    seller_branch_code: &'a str,
    seller_branch_name: &'a str,
    buyer_tin: &'a str,
    buyer_name: &'a str,
    buyer_branch_code: &'a str,
    buyer_branch_name: &'a str,
    data: String,
}

/// Builder for arbitrary two-party documents.
#[derive(Debug, Clone, Default)]
pub struct ArbitraryBuilder {
    base: PayloadAccumulator,
    draft: ArbitraryDraft,
}

impl ArbitraryBuilder {
    /// Start an arbitrary document, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: ArbitraryDraft::default(),
        }
    }

    /// Set the document number, date and title.
    pub fn header(mut self, header: DocumentHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Reference the underlying contract.
    pub fn contract(mut self, contract: ContractRef) -> Self {
        self.draft.contract = Some(contract);
        self
    }

    /// Set the sending party.
    pub fn seller(mut self, seller: ArbitraryParty) -> Self {
        self.draft.seller = Some(seller);
        self
    }

    /// Set the receiving party.
    pub fn buyer(mut self, buyer: ArbitraryParty) -> Self {
        self.draft.buyer = Some(buyer);
        self
    }

    /// Attach the document body as base64 text or raw bytes.
    pub fn pdf(mut self, pdf: impl Into<PdfContent>) -> Self {
        self.draft.pdf = Some(pdf.into());
        self
    }

    /// Unchecked override, merged deeply over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for ArbitraryBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let seller = require(DOCUMENT, "seller", &draft.seller)?;
        let buyer = require(DOCUMENT, "buyer", &draft.buyer)?;
        let pdf = require(DOCUMENT, "pdf", &draft.pdf)?;

        let wire = ArbitraryPayload {
            document: DocumentWire::from(header),
            contract_doc: draft.contract.as_ref().map(ContractDoc::from),
            seller_tin: &seller.tin,
            seller_name: &seller.name,
            seller_branch_code: or_empty(&seller.branch_code),
            seller_branch_name: or_empty(&seller.branch_name),
            buyer_tin: &buyer.tin,
            buyer_name: &buyer.name,
            buyer_branch_code: or_empty(&buyer.branch_code),
            buyer_branch_name: or_empty(&buyer.branch_name),
            data: pdf.data_url(),
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Deep)
    }
}
