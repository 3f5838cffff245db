//! # Invoice (factura, code `002`)
//!
//! Seller, buyer and a priced product list. Each line gets a pre-VAT sum,
//! a VAT amount and a with-VAT total; amounts stay native JSON numbers.
//! Raw overrides merge shallowly.

use didox_core::DocumentType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::LineTotals;
use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef, VatFlags};
use crate::error::{require, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::Invoice;

// -- Draft --------------------------------------------------------------------

/// Invoice number and date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceHeader {
    pub number: String,
    pub date: String,
}

/// Seller or buyer requisites. Unset optional fields are sent as `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceParty {
    pub tin: String,
    pub name: String,
    pub account: Option<String>,
    pub bank_id: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub work_phone: Option<String>,
    pub oked: Option<String>,
    pub district_id: Option<String>,
    pub director: Option<String>,
    pub accountant: Option<String>,
    pub vat_reg_code: Option<String>,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

/// One invoice line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceProduct {
    /// Ignored: lines are numbered by position.
    pub ord_no: Option<u32>,
    pub name: String,
    pub catalog_code: Option<String>,
    pub catalog_name: Option<String>,
    pub barcode: Option<String>,
    pub measure_id: Option<String>,
    pub package_code: Option<String>,
    pub package_name: Option<String>,
    pub count: f64,
    pub price: f64,
    pub vat_rate: Option<f64>,
}

#[derive(Debug, Clone, Default)]
struct InvoiceDraft {
    header: Option<InvoiceHeader>,
    contract: Option<ContractRef>,
    seller: Option<InvoiceParty>,
    buyer: Option<InvoiceParty>,
    products: Vec<InvoiceProduct>,
    flags: VatFlags,
}

// -- Wire ---------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InvoicePayload<'a> {
    version: u8,
    factura_type: u8,
    single_sided_type: u8,
    factura_doc: FacturaDoc<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_doc: Option<ContractDoc<'a>>,
    seller_tin: &'a str,
    buyer_tin: &'a str,
    seller: PartyWire<'a>,
    buyer: PartyWire<'a>,
    product_list: ProductListWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct FacturaDoc<'a> {
    factura_no: &'a str,
    factura_date: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PartyWire<'a> {
    name: &'a str,
    account: &'a str,
    bank_id: &'a str,
    address: &'a str,
    mobile: &'a str,
    work_phone: &'a str,
    oked: &'a str,
    district_id: &'a str,
    director: &'a str,
    accountant: &'a str,
    vat_reg_code: &'a str,
    branch_code: &'a str,
    branch_name: &'a str,
}

impl<'a> From<&'a InvoiceParty> for PartyWire<'a> {
    fn from(p: &'a InvoiceParty) -> Self {
        Self {
            name: &p.name,
            account: or_empty(&p.account),
            bank_id: or_empty(&p.bank_id),
            address: or_empty(&p.address),
            mobile: or_empty(&p.mobile),
            work_phone: or_empty(&p.work_phone),
            oked: or_empty(&p.oked),
            district_id: or_empty(&p.district_id),
            director: or_empty(&p.director),
            accountant: or_empty(&p.accountant),
            vat_reg_code: or_empty(&p.vat_reg_code),
            branch_code: or_empty(&p.branch_code),
            branch_name: or_empty(&p.branch_name),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductListWire<'a> {
    tin: &'a str,
    has_vat: bool,
    has_excise: bool,
    products: Vec<ProductWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductWire<'a> {
    ord_no: usize,
    name: &'a str,
    catalog_code: &'a str,
    catalog_name: &'a str,
    barcode: &'a str,
    measure_id: &'a str,
    package_code: &'a str,
    package_name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    count: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    summa: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    delivery_sum: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    vat_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    vat_sum: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    delivery_sum_with_vat: Decimal,
    without_vat: bool,
}

// -- Builder ------------------------------------------------------------------

/// Builder for invoice payloads.
///
/// ```
/// use didox_documents::builders::invoice::{InvoiceHeader, InvoiceParty, InvoiceProduct};
/// use didox_documents::common::VatFlags;
/// use didox_documents::{builders, DocumentBuilder};
///
/// let payload = builders::invoice(None)
///     .header(InvoiceHeader { number: "INV-1".into(), date: "2025-02-07".into() })
///     .seller(InvoiceParty { tin: "123456789".into(), name: "Seller".into(), ..Default::default() })
///     .buyer(InvoiceParty { tin: "987654321".into(), name: "Buyer".into(), ..Default::default() })
///     .product(InvoiceProduct { name: "Cement".into(), count: 2.0, price: 50.0, vat_rate: Some(12.0), ..Default::default() })
///     .flags(VatFlags { has_vat: true })
///     .build()
///     .unwrap();
/// assert_eq!(payload["ProductList"]["Products"][0]["VatSum"].as_f64(), Some(12.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    base: PayloadAccumulator,
    draft: InvoiceDraft,
}

impl InvoiceBuilder {
    /// Start an invoice, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: InvoiceDraft::default(),
        }
    }

    /// Set the invoice number and date.
    pub fn header(mut self, header: InvoiceHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Reference the contract the invoice is issued under.
    pub fn contract(mut self, contract: ContractRef) -> Self {
        self.draft.contract = Some(contract);
        self
    }

    /// Set the seller requisites. Its TIN also keys the product list.
    pub fn seller(mut self, seller: InvoiceParty) -> Self {
        self.draft.seller = Some(seller);
        self
    }

    /// Set the buyer requisites.
    pub fn buyer(mut self, buyer: InvoiceParty) -> Self {
        self.draft.buyer = Some(buyer);
        self
    }

    /// Append one line.
    pub fn product(mut self, product: InvoiceProduct) -> Self {
        self.draft.products.push(product);
        self
    }

    /// Append several lines in order.
    pub fn products(mut self, products: impl IntoIterator<Item = InvoiceProduct>) -> Self {
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

impl DocumentBuilder for InvoiceBuilder {
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
                Ok(ProductWire {
                    ord_no: i + 1,
                    name: &p.name,
                    catalog_code: or_empty(&p.catalog_code),
                    catalog_name: or_empty(&p.catalog_name),
                    barcode: or_empty(&p.barcode),
                    measure_id: or_empty(&p.measure_id),
                    package_code: or_empty(&p.package_code),
                    package_name: or_empty(&p.package_name),
                    count: totals.count,
                    summa: totals.price,
                    delivery_sum: totals.without_vat,
                    vat_rate: totals.vat_rate,
                    vat_sum: totals.vat,
                    delivery_sum_with_vat: totals.with_vat,
                    without_vat: !has_vat,
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let wire = InvoicePayload {
            version: 1,
            factura_type: 0,
            single_sided_type: 0,
            factura_doc: FacturaDoc {
                factura_no: &header.number,
                factura_date: &header.date,
            },
            contract_doc: draft.contract.as_ref().map(ContractDoc::from),
            seller_tin: &seller.tin,
            buyer_tin: &buyer.tin,
            seller: PartyWire::from(seller),
            buyer: PartyWire::from(buyer),
            product_list: ProductListWire {
                tin: &seller.tin,
                has_vat,
                has_excise: false,
                products,
            },
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Shallow)
    }
}
