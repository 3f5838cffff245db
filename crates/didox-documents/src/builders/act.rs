//! # Act of completed work (code `005`)
//!
//! Same arithmetic as the invoice, but the act flattens the parties into
//! `Seller*`/`Buyer*` fields and sends every amount as a string: money with
//! two decimals, counts and rates in shortest form.

use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::{fixed2, plain, LineTotals};
use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef, VatFlags};
use crate::error::{require, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::Act;

/// Act number, date and free-text description of the work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActHeader {
    pub number: String,
    pub date: String,
    pub text: String,
}

/// Contractor or customer requisites, flattened into `Seller*`/`Buyer*` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActParty {
    pub tin: String,
    pub name: String,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

/// One act line. `without_vat` overrides the document-level flag for this
/// line only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActProduct {
    pub ord_no: Option<u32>,
    pub name: String,
    pub catalog_code: Option<String>,
    pub catalog_name: Option<String>,
    pub measure_id: Option<String>,
    pub count: f64,
    pub price: f64,
    pub vat_rate: Option<f64>,
    pub without_vat: Option<bool>,
}

#[derive(Debug, Clone, Default)]
struct ActDraft {
    header: Option<ActHeader>,
    contract: Option<ContractRef>,
    seller: Option<ActParty>,
    buyer: Option<ActParty>,
    products: Vec<ActProduct>,
    flags: VatFlags,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActPayload<'a> {
    act_doc: ActDoc<'a>,
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
    product_list: ActProductList<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActDoc<'a> {
    act_no: &'a str,
    act_date: &'a str,
    act_text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActProductList<'a> {
    tin: &'a str,
    has_vat: bool,
    products: Vec<ActProductWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActProductWire<'a> {
    ord_no: usize,
    name: &'a str,
    catalog_code: &'a str,
    catalog_name: &'a str,
    measure_id: &'a str,
    count: String,
    summa: String,
    total_sum_without_vat: String,
    vat_rate: String,
    vat_sum: String,
    total_sum: String,
    without_vat: bool,
}

/// Builder for act payloads.
#[derive(Debug, Clone, Default)]
pub struct ActBuilder {
    base: PayloadAccumulator,
    draft: ActDraft,
}

impl ActBuilder {
    /// Start an act, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: ActDraft::default(),
        }
    }

    /// Set the act number, date and description.
    pub fn header(mut self, header: ActHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Reference the contract the works were done under.
    pub fn contract(mut self, contract: ContractRef) -> Self {
        self.draft.contract = Some(contract);
        self
    }

    /// Set the contractor.
    pub fn seller(mut self, seller: ActParty) -> Self {
        self.draft.seller = Some(seller);
        self
    }

    /// Set the customer.
    pub fn buyer(mut self, buyer: ActParty) -> Self {
        self.draft.buyer = Some(buyer);
        self
    }

    /// Append one line of work.
    pub fn product(mut self, product: ActProduct) -> Self {
        self.draft.products.push(product);
        self
    }

    /// Append several lines in order.
    pub fn products(mut self, products: impl IntoIterator<Item = ActProduct>) -> Self {
        self.draft.products.extend(products);
        self
    }

    /// Set whether the document charges VAT.
    pub fn flags(mut self, flags: VatFlags) -> Self {
        self.draft.flags = flags;
        self
    }

    /// Unchecked override, merged shallowly over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for ActBuilder {
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
        let products = require_items(DOCUMENT, "products", &draft.products)?;
        let has_vat = draft.flags.has_vat;

        let products = products
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let totals = LineTotals::compute(DOCUMENT, p.count, p.price, p.vat_rate, has_vat)?;
                Ok(ActProductWire {
                    ord_no: i + 1,
                    name: &p.name,
                    catalog_code: or_empty(&p.catalog_code),
                    catalog_name: or_empty(&p.catalog_name),
                    measure_id: or_empty(&p.measure_id),
                    count: plain(totals.count),
                    summa: fixed2(totals.price),
                    total_sum_without_vat: fixed2(totals.without_vat),
                    vat_rate: plain(totals.vat_rate),
                    vat_sum: fixed2(totals.vat),
                    total_sum: fixed2(totals.with_vat),
                    without_vat: p.without_vat.unwrap_or(!has_vat),
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let wire = ActPayload {
            act_doc: ActDoc {
                act_no: &header.number,
                act_date: &header.date,
                act_text: &header.text,
            },
            contract_doc: draft.contract.as_ref().map(ContractDoc::from),
            seller_tin: &seller.tin,
            seller_name: &seller.name,
            seller_branch_code: or_empty(&seller.branch_code),
            seller_branch_name: or_empty(&seller.branch_name),
            buyer_tin: &buyer.tin,
            buyer_name: &buyer.name,
            buyer_branch_code: or_empty(&buyer.branch_code),
            buyer_branch_name: or_empty(&buyer.branch_name),
            product_list: ActProductList {
                tin: &seller.tin,
                has_vat,
                products,
            },
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Shallow)
    }
}
