//! # Founders' meeting protocol (code `075`)
//!
//! Minutes of a founders' meeting: the company, the participating founders
//! with their shares, and the agenda with decisions. Raw overrides merge
//! deeply.

use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::{amount, plain};
use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::or_empty;
use crate::error::{require, require_item_field, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::FoundersProtocol;

/// Protocol number, date and meeting place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolHeader {
    pub number: String,
    pub date: String,
    pub place: String,
}

/// Company whose founders met.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolCompany {
    pub tin: String,
    pub name: String,
    pub address: Option<String>,
}

/// A founder's share, given either as a number or as text such as `"50%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Share {
    Number(f64),
    Text(String),
}

impl Default for Share {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Share {
    fn to_wire(&self) -> Result<String, BuildError> {
        match self {
            Self::Number(n) => amount(DOCUMENT, "participants.share", *n).map(plain),
            Self::Text(s) => Ok(s.clone()),
        }
    }
}

impl From<f64> for Share {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Share {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// An attending founder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Founder {
    pub ord_no: Option<u32>,
    pub pinfl: String,
    pub fio: String,
    pub share: Share,
    pub is_chairman: Option<bool>,
    pub is_secretary: Option<bool>,
}

/// One agenda item and the decision taken on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgendaPart {
    pub ord_no: Option<u32>,
    pub title: String,
    pub decision: String,
}

#[derive(Debug, Clone, Default)]
struct ProtocolDraft {
    header: Option<ProtocolHeader>,
    company: Option<ProtocolCompany>,
    participants: Vec<Founder>,
    agenda: Vec<AgendaPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProtocolPayload<'a> {
    protocol_doc: ProtocolDoc<'a>,
    company: CompanyWire<'a>,
    participants: Vec<FounderWire<'a>>,
    agenda_parts: Vec<AgendaWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProtocolDoc<'a> {
    protocol_no: &'a str,
    protocol_date: &'a str,
    place: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CompanyWire<'a> {
    tin: &'a str,
    name: &'a str,
    address: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct FounderWire<'a> {
    ord_no: usize,
    pinfl: &'a str,
    fio: &'a str,
    share: String,
    is_chairman: bool,
    is_secretary: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AgendaWire<'a> {
    ord_no: usize,
    title: &'a str,
    decision: &'a str,
}

/// Builder for founders' protocol payloads.
#[derive(Debug, Clone, Default)]
pub struct FoundersProtocolBuilder {
    base: PayloadAccumulator,
    draft: ProtocolDraft,
}

impl FoundersProtocolBuilder {
    /// Start a protocol, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: ProtocolDraft::default(),
        }
    }

    /// Set the protocol number, date and meeting place.
    pub fn header(mut self, header: ProtocolHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Set the company whose founders met.
    pub fn company(mut self, company: ProtocolCompany) -> Self {
        self.draft.company = Some(company);
        self
    }

    /// Append one attending founder. Each needs a PINFL.
    pub fn participant(mut self, founder: Founder) -> Self {
        self.draft.participants.push(founder);
        self
    }

    /// Append several founders in order.
    pub fn participants(mut self, founders: impl IntoIterator<Item = Founder>) -> Self {
        self.draft.participants.extend(founders);
        self
    }

    /// Append one agenda item with its decision.
    pub fn agenda_part(mut self, part: AgendaPart) -> Self {
        self.draft.agenda.push(part);
        self
    }

    /// Append several agenda items in order.
    pub fn agenda(mut self, parts: impl IntoIterator<Item = AgendaPart>) -> Self {
        self.draft.agenda.extend(parts);
        self
    }

    /// Unchecked override, merged deeply over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for FoundersProtocolBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let company = require(DOCUMENT, "company", &draft.company)?;
        let participants = require_items(DOCUMENT, "participants", &draft.participants)?;
        require_item_field(DOCUMENT, "participants", "pinfl", participants, |f| f.pinfl.as_str())?;
        let agenda = require_items(DOCUMENT, "agenda", &draft.agenda)?;

        let wire = ProtocolPayload {
            protocol_doc: ProtocolDoc {
                protocol_no: &header.number,
                protocol_date: &header.date,
                place: &header.place,
            },
            company: CompanyWire {
                tin: &company.tin,
                name: &company.name,
                address: or_empty(&company.address),
            },
            participants: participants
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    Ok(FounderWire {
                        ord_no: i + 1,
                        pinfl: &f.pinfl,
                        fio: &f.fio,
                        share: f.share.to_wire()?,
                        is_chairman: f.is_chairman.unwrap_or(false),
                        is_secretary: f.is_secretary.unwrap_or(false),
                    })
                })
                .collect::<Result<Vec<_>, BuildError>>()?,
            agenda_parts: agenda
                .iter()
                .enumerate()
                .map(|(i, a)| AgendaWire {
                    ord_no: i + 1,
                    title: &a.title,
                    decision: &a.decision,
                })
                .collect(),
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Deep)
    }
}
