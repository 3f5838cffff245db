//! # Multi-party arbitrary document (code `010`)
//!
//! One owner sends a PDF to several client organisations. Clients are
//! numbered by position. Raw overrides merge deeply.

use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef, DocumentHeader, DocumentWire, PdfContent};
use crate::error::{require, require_item_field, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::MultiPartyArbitrary;

/// The owner or one of the clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub tin: String,
    pub name: String,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct MultiPartyDraft {
    header: Option<DocumentHeader>,
    contract: Option<ContractRef>,
    owner: Option<Participant>,
    clients: Vec<Participant>,
    pdf: Option<PdfContent>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct MultiPartyPayload<'a> {
    document: DocumentWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_doc: Option<ContractDoc<'a>>,
    tin: &'a str,
    name: &'a str,
    branch_code: &'a str,
    branch_name: &'a str,
    clients: Vec<ClientWire<'a>>,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ClientWire<'a> {
    ord_no: usize,
    tin: &'a str,
    name: &'a str,
    branch_code: &'a str,
    branch_name: &'a str,
}

/// Builder for multi-party arbitrary documents.
#[derive(Debug, Clone, Default)]
pub struct MultiPartyBuilder {
    base: PayloadAccumulator,
    draft: MultiPartyDraft,
}

impl MultiPartyBuilder {
    /// Start a multi-party document, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: MultiPartyDraft::default(),
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

    /// The sending organisation.
    pub fn owner(mut self, owner: Participant) -> Self {
        self.draft.owner = Some(owner);
        self
    }

    /// Append one receiving party. Each needs a TIN.
    pub fn client(mut self, client: Participant) -> Self {
        self.draft.clients.push(client);
        self
    }

    /// Append several receiving parties in order.
    pub fn clients(mut self, clients: impl IntoIterator<Item = Participant>) -> Self {
        self.draft.clients.extend(clients);
        self
    }

    /// Attach the document body as a PDF.
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

impl DocumentBuilder for MultiPartyBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let owner = require(DOCUMENT, "owner", &draft.owner)?;
        let clients = require_items(DOCUMENT, "clients", &draft.clients)?;
        require_item_field(DOCUMENT, "clients", "tin", clients, |c| c.tin.as_str())?;
        let pdf = require(DOCUMENT, "pdf", &draft.pdf)?;

        let wire = MultiPartyPayload {
            document: DocumentWire::from(header),
            contract_doc: draft.contract.as_ref().map(ContractDoc::from),
            tin: &owner.tin,
            name: &owner.name,
            branch_code: or_empty(&owner.branch_code),
            branch_name: or_empty(&owner.branch_name),
            clients: clients
                .iter()
                .enumerate()
                .map(|(i, c)| ClientWire {
                    ord_no: i + 1,
                    tin: &c.tin,
                    name: &c.name,
                    branch_code: or_empty(&c.branch_code),
                    branch_name: or_empty(&c.branch_name),
                })
                .collect(),
            data: pdf.data_url(),
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Deep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn participant(tin: &str) -> Participant {
        Participant {
            tin: tin.into(),
            name: format!("Org {tin}"),
            ..Default::default()
        }
    }

    fn builder() -> MultiPartyBuilder {
        MultiPartyBuilder::new(None)
            .header(DocumentHeader {
                number: "M-1".into(),
                date: "2025-02-07".into(),
                name: "Joint memo".into(),
            })
            .owner(participant("123456789"))
            .pdf("JVBERg==")
    }

    #[test]
    fn clients_numbered_in_order() {
        let p = builder()
            .client(participant("111111111"))
            .client(participant("222222222"))
            .build()
            .unwrap();
        assert_eq!(p["Tin"], json!("123456789"));
        assert_eq!(p["Clients"][0]["OrdNo"], json!(1));
        assert_eq!(p["Clients"][1]["OrdNo"], json!(2));
        assert_eq!(p["Clients"][1]["Tin"], json!("222222222"));
        assert_eq!(p["Clients"][1]["BranchName"], json!(""));
        assert_eq!(p["Data"], json!("data:application/pdf;base64,JVBERg=="));
    }

    #[test]
    fn client_without_tin_is_reported_with_index() {
        let err = builder()
            .client(participant("111111111"))
            .client(Participant {
                name: "No TIN".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingRequiredListItemField {
                document: DocumentType::MultiPartyArbitrary,
                list: "clients",
                index: 1,
                field: "tin"
            }
        );
    }

    #[test]
    fn requires_at_least_one_client() {
        let err = builder().build().unwrap_err();
        assert!(matches!(err, BuildError::EmptyRequiredList { list: "clients", .. }));
    }

    #[test]
    fn raw_replaces_client_array() {
        let p = builder()
            .client(participant("111111111"))
            .client(participant("222222222"))
            .raw(json!({"Clients": [{"Tin": "333333333"}]}))
            .build()
            .unwrap();
        assert_eq!(p["Clients"], json!([{"Tin": "333333333"}]));
    }

    #[test]
    fn raw_merges_nested_objects_deeply() {
        let p = builder()
            .client(participant("111111111"))
            .raw(json!({"Document": {"DocumentName": "Amended memo"}}))
            .build()
            .unwrap();
        assert_eq!(
            p["Document"],
            json!({
                "DocumentNo": "M-1",
                "DocumentDate": "2025-02-07",
                "DocumentName": "Amended memo"
            })
        );
        assert_eq!(p["Tin"], json!("123456789"));
        assert_eq!(p["Clients"][0]["Tin"], json!("111111111"));
    }
}
