//! # Empowerment / power of attorney (code `006`)
//!
//! Authorises an agent to receive goods from the seller on behalf of the
//! buyer. Products carry quantities only. Raw overrides merge deeply.

use didox_core::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef};
use crate::error::{require, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::Empowerment;

/// Empowerment number and validity period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmpowermentHeader {
    pub number: String,
    pub date_of_issue: String,
    pub date_of_expire: String,
}

/// Seller or buyer requisites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub tin: String,
    pub name: String,
    pub account: Option<String>,
    pub bank_id: Option<String>,
    pub address: Option<String>,
    pub director: Option<String>,
    pub accountant: Option<String>,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

/// Agent's identity document; absent fields are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Passport {
    pub number: Option<String>,
    pub issued_by: Option<String>,
    pub date_of_issue: Option<String>,
}

/// The person receiving goods under the power of attorney.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    pub tin: String,
    pub fio: String,
    pub job_title: Option<String>,
    pub passport: Passport,
}

/// A product to receive, by quantity only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmpowermentProduct {
    pub ord_no: Option<u32>,
    pub name: String,
    pub measure_id: Option<String>,
    pub count: f64,
    pub catalog_code: Option<String>,
    pub catalog_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct EmpowermentDraft {
    header: Option<EmpowermentHeader>,
    contract: Option<ContractRef>,
    agent: Option<Agent>,
    seller: Option<Company>,
    buyer: Option<Company>,
    products: Vec<EmpowermentProduct>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct EmpowermentPayload<'a> {
    empowerment_doc: EmpowermentDoc<'a>,
    contract_doc: ContractDoc<'a>,
    agent: AgentWire<'a>,
    seller_tin: &'a str,
    buyer_tin: &'a str,
    seller: CompanyWire<'a>,
    buyer: CompanyWire<'a>,
    product_list: ProductListWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct EmpowermentDoc<'a> {
    empowerment_no: &'a str,
    empowerment_date_of_issue: &'a str,
    empowerment_date_of_expire: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AgentWire<'a> {
    agent_tin: &'a str,
    fio: &'a str,
    job_title: Option<&'a str>,
    passport: PassportWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PassportWire<'a> {
    number: Option<&'a str>,
    issued_by: Option<&'a str>,
    date_of_issue: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CompanyWire<'a> {
    name: &'a str,
    account: &'a str,
    bank_id: &'a str,
    address: &'a str,
    director: &'a str,
    accountant: &'a str,
    branch_code: &'a str,
    branch_name: &'a str,
}

impl<'a> From<&'a Company> for CompanyWire<'a> {
    fn from(c: &'a Company) -> Self {
        Self {
            name: &c.name,
            account: or_empty(&c.account),
            bank_id: or_empty(&c.bank_id),
            address: or_empty(&c.address),
            director: or_empty(&c.director),
            accountant: or_empty(&c.accountant),
            branch_code: or_empty(&c.branch_code),
            branch_name: or_empty(&c.branch_name),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductListWire<'a> {
    tin: &'a str,
    has_excise: bool,
    has_vat: bool,
    products: Vec<ProductWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductWire<'a> {
    ord_no: usize,
    name: &'a str,
    measure_id: &'a str,
    count: f64,
    catalog_code: &'a str,
    catalog_name: &'a str,
}

/// Builder for empowerment payloads.
#[derive(Debug, Clone, Default)]
pub struct EmpowermentBuilder {
    base: PayloadAccumulator,
    draft: EmpowermentDraft,
}

impl EmpowermentBuilder {
    /// Start an empowerment, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: EmpowermentDraft::default(),
        }
    }

    /// Set the number and the validity period.
    pub fn header(mut self, header: EmpowermentHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Reference the supply contract. Blank when unset.
    pub fn contract(mut self, contract: ContractRef) -> Self {
        self.draft.contract = Some(contract);
        self
    }

    /// Set the person authorised to receive the goods.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.draft.agent = Some(agent);
        self
    }

    /// Set the supplier. Its TIN also keys the product list.
    pub fn seller(mut self, seller: Company) -> Self {
        self.draft.seller = Some(seller);
        self
    }

    /// Set the company issuing the power of attorney.
    pub fn buyer(mut self, buyer: Company) -> Self {
        self.draft.buyer = Some(buyer);
        self
    }

    /// Append one product to receive.
    pub fn product(mut self, product: EmpowermentProduct) -> Self {
        self.draft.products.push(product);
        self
    }

    /// Append several products in order.
    pub fn products(mut self, products: impl IntoIterator<Item = EmpowermentProduct>) -> Self {
        self.draft.products.extend(products);
        self
    }

    /// Unchecked override, merged deeply over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for EmpowermentBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let agent = require(DOCUMENT, "agent", &draft.agent)?;
        let seller = require(DOCUMENT, "seller", &draft.seller)?;
        let buyer = require(DOCUMENT, "buyer", &draft.buyer)?;
        let products = require_items(DOCUMENT, "products", &draft.products)?;

        let wire = EmpowermentPayload {
            empowerment_doc: EmpowermentDoc {
                empowerment_no: &header.number,
                empowerment_date_of_issue: &header.date_of_issue,
                empowerment_date_of_expire: &header.date_of_expire,
            },
            contract_doc: draft.contract.as_ref().map_or(ContractDoc::EMPTY, ContractDoc::from),
            agent: AgentWire {
                agent_tin: &agent.tin,
                fio: &agent.fio,
                job_title: agent.job_title.as_deref(),
                passport: PassportWire {
                    number: agent.passport.number.as_deref(),
                    issued_by: agent.passport.issued_by.as_deref(),
                    date_of_issue: agent.passport.date_of_issue.as_deref(),
                },
            },
            seller_tin: &seller.tin,
            buyer_tin: &buyer.tin,
            seller: CompanyWire::from(seller),
            buyer: CompanyWire::from(buyer),
            product_list: ProductListWire {
                tin: &seller.tin,
                has_excise: false,
                has_vat: false,
                products: products
                    .iter()
                    .enumerate()
                    .map(|(i, p)| ProductWire {
                        ord_no: i + 1,
                        name: &p.name,
                        measure_id: or_empty(&p.measure_id),
                        count: p.count,
                        catalog_code: or_empty(&p.catalog_code),
                        catalog_name: or_empty(&p.catalog_name),
                    })
                    .collect(),
            },
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Deep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company(tin: &str) -> Company {
        Company {
            tin: tin.into(),
            name: format!("Company {tin}"),
            ..Default::default()
        }
    }

    fn builder() -> EmpowermentBuilder {
        EmpowermentBuilder::new(None)
            .header(EmpowermentHeader {
                number: "E-1".into(),
                date_of_issue: "2025-02-01".into(),
                date_of_expire: "2025-02-11".into(),
            })
            .agent(Agent {
                tin: "12345678901234".into(),
                fio: "Agent Name".into(),
                ..Default::default()
            })
            .seller(company("123456789"))
            .buyer(company("987654321"))
            .product(EmpowermentProduct {
                name: "Paper".into(),
                count: 5.0,
                ..Default::default()
            })
    }

    #[test]
    fn product_list_flags_and_tin_are_fixed() {
        let p = builder().build().unwrap();
        assert_eq!(p["ProductList"]["HasExcise"], json!(false));
        assert_eq!(p["ProductList"]["HasVat"], json!(false));
        assert_eq!(p["ProductList"]["Tin"], json!("123456789"));
        assert_eq!(p["ProductList"]["Products"][0]["OrdNo"], json!(1));
        assert_eq!(p["ProductList"]["Products"][0]["Count"].as_f64(), Some(5.0));
        assert!(p["ProductList"]["Products"][0].get("VatSum").is_none());
    }

    #[test]
    fn agent_optional_fields_default_to_null() {
        let p = builder().build().unwrap();
        assert_eq!(
            p["Agent"],
            json!({
                "AgentTin": "12345678901234",
                "Fio": "Agent Name",
                "JobTitle": null,
                "Passport": {"Number": null, "IssuedBy": null, "DateOfIssue": null}
            })
        );
    }

    #[test]
    fn contract_doc_always_present() {
        let p = builder().build().unwrap();
        assert_eq!(p["ContractDoc"], json!({"ContractNo": "", "ContractDate": ""}));

        let p = builder()
            .contract(ContractRef {
                number: "C-9".into(),
                date: "2025-01-15".into(),
            })
            .build()
            .unwrap();
        assert_eq!(p["ContractDoc"], json!({"ContractNo": "C-9", "ContractDate": "2025-01-15"}));
    }

    #[test]
    fn company_strings_default_empty() {
        let p = builder().build().unwrap();
        assert_eq!(p["Seller"]["BranchCode"], json!(""));
        assert_eq!(p["Buyer"]["Accountant"], json!(""));
        assert_eq!(p["SellerTin"], json!("123456789"));
    }

    #[test]
    fn empty_products_rejected() {
        let err = EmpowermentBuilder::new(None)
            .header(EmpowermentHeader::default())
            .agent(Agent::default())
            .seller(company("123456789"))
            .buyer(company("987654321"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::EmptyRequiredList {
                document: DocumentType::Empowerment,
                list: "products"
            }
        );
    }

    #[test]
    fn raw_merges_deeply() {
        let p = builder()
            .raw(json!({"Agent": {"Passport": {"Number": "AA1234567"}}}))
            .build()
            .unwrap();
        assert_eq!(p.pointer("/Agent/Passport/Number"), Some(&json!("AA1234567")));
        assert_eq!(p.pointer("/Agent/Fio"), Some(&json!("Agent Name")));
        assert_eq!(p.pointer("/Agent/Passport/IssuedBy"), Some(&Value::Null));
    }
}
