//! # Letter to the tax authority (code `013`)
//!
//! A free-form HTML letter between a sender and a recipient, optionally
//! with file attachments. The HTML body is sent exactly as given. Raw
//! overrides merge deeply.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::or_empty;
use crate::error::{require, require_item_field, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::LetterToAuthority;

/// Letter number, date and subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterHeader {
    pub number: String,
    pub date: String,
    pub subject: String,
}

/// Letterhead details printed for a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterHead {
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub phones: Vec<String>,
}

/// Sender or recipient with optional letterhead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterParty {
    pub tin: String,
    pub name: String,
    pub address: Option<String>,
    pub head: Option<LetterHead>,
}

/// A file sent with the letter. `content` is base64 text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub content: String,
    pub description: Option<String>,
}

impl Attachment {
    /// Encode raw file bytes, recording their length as the size.
    pub fn from_bytes(filename: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            content: STANDARD.encode(bytes),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct LetterDraft {
    header: Option<LetterHeader>,
    sender: Option<LetterParty>,
    recipient: Option<LetterParty>,
    content: Option<String>,
    attachments: Vec<Attachment>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LetterPayload<'a> {
    letter_doc: LetterDoc<'a>,
    sender: PartyWire<'a>,
    recipient: PartyWire<'a>,
    content: &'a str,
    attachments: Vec<AttachmentWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LetterDoc<'a> {
    letter_no: &'a str,
    letter_date: &'a str,
    subject: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PartyWire<'a> {
    tin: &'a str,
    name: &'a str,
    address: &'a str,
    head: HeadWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HeadWire<'a> {
    branch_code: &'a str,
    branch_name: &'a str,
    email: &'a str,
    website: Option<&'a str>,
    logo: &'a str,
    phones: &'a [String],
}

const EMPTY_HEAD: HeadWire<'static> = HeadWire {
    branch_code: "",
    branch_name: "",
    email: "",
    website: None,
    logo: "",
    phones: &[],
};

impl<'a> From<&'a LetterParty> for PartyWire<'a> {
    fn from(p: &'a LetterParty) -> Self {
        let head = match &p.head {
            Some(h) => HeadWire {
                branch_code: or_empty(&h.branch_code),
                branch_name: or_empty(&h.branch_name),
                email: or_empty(&h.email),
                website: h.website.as_deref(),
                logo: or_empty(&h.logo),
                phones: &h.phones,
            },
            None => EMPTY_HEAD,
        };
        Self {
            tin: &p.tin,
            name: &p.name,
            address: or_empty(&p.address),
            head,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttachmentWire<'a> {
    filename: &'a str,
    mime_type: &'a str,
    size: u64,
    content: &'a str,
    description: &'a str,
}

/// Builder for letters to the tax authority.
#[derive(Debug, Clone, Default)]
pub struct LetterBuilder {
    base: PayloadAccumulator,
    draft: LetterDraft,
}

impl LetterBuilder {
    /// Start a letter, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: LetterDraft::default(),
        }
    }

    /// Set the letter number, date and subject.
    pub fn header(mut self, header: LetterHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Set the writing organisation.
    pub fn sender(mut self, sender: LetterParty) -> Self {
        self.draft.sender = Some(sender);
        self
    }

    /// Set the addressed authority.
    pub fn recipient(mut self, recipient: LetterParty) -> Self {
        self.draft.recipient = Some(recipient);
        self
    }

    /// HTML body, sent verbatim.
    pub fn content(mut self, html: impl Into<String>) -> Self {
        self.draft.content = Some(html.into());
        self
    }

    /// Append a file to send with the letter.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.draft.attachments.push(attachment);
        self
    }

    /// Attach raw file bytes; see [`Attachment::from_bytes`].
    pub fn attachment_bytes(self, filename: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        self.attachment(Attachment::from_bytes(filename, mime_type, bytes))
    }

    /// Unchecked override, merged deeply over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for LetterBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let sender = require(DOCUMENT, "sender", &draft.sender)?;
        let recipient = require(DOCUMENT, "recipient", &draft.recipient)?;
        let content = require(DOCUMENT, "content", &draft.content)?;
        require_item_field(DOCUMENT, "attachments", "filename", &draft.attachments, |a| {
            a.filename.as_str()
        })?;

        let wire = LetterPayload {
            letter_doc: LetterDoc {
                letter_no: &header.number,
                letter_date: &header.date,
                subject: &header.subject,
            },
            sender: PartyWire::from(sender),
            recipient: PartyWire::from(recipient),
            content: content.as_str(),
            attachments: draft
                .attachments
                .iter()
                .map(|a| AttachmentWire {
                    filename: &a.filename,
                    mime_type: &a.mime_type,
                    size: a.size,
                    content: &a.content,
                    description: or_empty(&a.description),
                })
                .collect(),
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Deep)
    }
}
