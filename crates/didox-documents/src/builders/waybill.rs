//! # Transport Waybill (code `041`)
//!
//! A waybill carries parties, a vehicle, and one or more product groups,
//! each travelling between a loading and an unloading point. Product groups
//! are assembled with [`ProductGroupBuilder`] through
//! [`WaybillBuilder::add_product_group`].
//!
//! ## Delivery arithmetic
//!
//! - `Amount = count × price`
//! - `DeliverySum = round(Amount / 100 × pricePerKm)`, where `round` breaks
//!   ties toward positive infinity.
//! - `TotalDeliveryCost = distanceKm × pricePerKm`, two-decimal string.
//!
//! Raw overrides merge shallowly.

use didox_core::DocumentType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::{amount, fixed2, in_range, js_round};
use crate::builder::{finish, DocumentBuilder, PayloadAccumulator};
use crate::common::{or_empty, ContractDoc, ContractRef};
use crate::error::{require, require_items, BuildError};
use crate::payload::{MergeStrategy, Payload};

const DOCUMENT: DocumentType = DocumentType::TransportWaybill;

// -- Draft --------------------------------------------------------------------

/// Waybill number, date and delivery type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaybillHeader {
    pub number: String,
    pub date: String,
    /// Platform delivery-type code (e.g. `1` within a district, `2` between).
    pub delivery_type: u8,
}

/// Consignor, consignee, carrier or an optional side party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaybillParty {
    pub tin_or_pinfl: String,
    pub name: String,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
}

/// A natural person identified by PINFL: driver, trustee or responsible
/// person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub pinfl: String,
    pub full_name: String,
}

/// Truck or trailer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub reg_no: String,
    pub model: String,
}

/// Vehicles and driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transport {
    pub truck: Vehicle,
    pub trailer: Option<Vehicle>,
    pub driver: Person,
}

/// Route length and tariff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaybillTotals {
    pub distance_km: f64,
    pub price_per_km: f64,
}

/// Loading or unloading location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Point {
    pub region_id: String,
    pub district_id: String,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// One product carried in a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaybillProduct {
    /// Ignored: products are numbered by position within their group.
    pub ord_no: Option<u32>,
    pub committent_tin_or_pinfl: Option<String>,
    pub committent_name: Option<String>,
    pub product_name: String,
    pub catalog_code: Option<String>,
    pub catalog_name: Option<String>,
    pub package_code: Option<String>,
    pub package_name: Option<String>,
    pub count: f64,
    pub price: f64,
    pub weight_brutto: Option<f64>,
    pub weight_netto: Option<f64>,
}

/// A validated product group, as produced by [`ProductGroupBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductGroup {
    pub loading_point: Point,
    pub unloading_point: Point,
    pub loading_trustee: Option<Person>,
    pub unloading_trustee: Option<Person>,
    pub products: Vec<WaybillProduct>,
}

#[derive(Debug, Clone, Default)]
struct WaybillDraft {
    header: Option<WaybillHeader>,
    contract: Option<ContractRef>,
    consignor: Option<WaybillParty>,
    consignee: Option<WaybillParty>,
    carrier: Option<WaybillParty>,
    freight_forwarder: Option<WaybillParty>,
    client: Option<WaybillParty>,
    payer: Option<WaybillParty>,
    responsible_person: Option<Person>,
    transport: Option<Transport>,
    totals: Option<WaybillTotals>,
    groups: Vec<Result<ProductGroup, BuildError>>,
    has_committent: Option<bool>,
    single_sided_type: Option<u8>,
}

// -- Product group sub-builder ------------------------------------------------

/// Nested builder for one waybill product group.
///
/// Requires a loading point, an unloading point and at least one product.
#[derive(Debug, Clone, Default)]
pub struct ProductGroupBuilder {
    loading_point: Option<Point>,
    unloading_point: Option<Point>,
    loading_trustee: Option<Person>,
    unloading_trustee: Option<Person>,
    products: Vec<WaybillProduct>,
}

impl ProductGroupBuilder {
    /// Empty product group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set where the goods are loaded.
    pub fn loading_point(mut self, point: Point) -> Self {
        self.loading_point = Some(point);
        self
    }

    /// Set where the goods are delivered.
    pub fn unloading_point(mut self, point: Point) -> Self {
        self.unloading_point = Some(point);
        self
    }

    /// Set the person handing the goods over at loading.
    pub fn loading_trustee(mut self, trustee: Person) -> Self {
        self.loading_trustee = Some(trustee);
        self
    }

    /// Set the person accepting the goods at unloading.
    pub fn unloading_trustee(mut self, trustee: Person) -> Self {
        self.unloading_trustee = Some(trustee);
        self
    }

    /// Append one product to the group.
    pub fn product(mut self, product: WaybillProduct) -> Self {
        self.products.push(product);
        self
    }

    /// Append several products in order.
    pub fn products(mut self, products: impl IntoIterator<Item = WaybillProduct>) -> Self {
        self.products.extend(products);
        self
    }

    /// Validate and snapshot the group.
    pub fn build(&self) -> Result<ProductGroup, BuildError> {
        let loading_point = require(DOCUMENT, "loading_point", &self.loading_point)?;
        let unloading_point = require(DOCUMENT, "unloading_point", &self.unloading_point)?;
        let products = require_items(DOCUMENT, "products", &self.products)?;
        Ok(ProductGroup {
            loading_point: loading_point.clone(),
            unloading_point: unloading_point.clone(),
            loading_trustee: self.loading_trustee.clone(),
            unloading_trustee: self.unloading_trustee.clone(),
            products: products.to_vec(),
        })
    }
}

// -- Wire ---------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WaybillPayload<'a> {
    waybill_doc: WaybillDoc<'a>,
    delivery_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_doc: Option<ContractDoc<'a>>,
    consignor: PartyWire<'a>,
    consignee: PartyWire<'a>,
    carrier: PartyWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    freight_forwarder: Option<PartyWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client: Option<PartyWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer: Option<PartyWire<'a>>,
    responsible_person: PersonWire<'a>,
    transport: TransportWire<'a>,
    product_groups: Vec<GroupWire<'a>>,
    total_distance: String,
    #[serde(with = "rust_decimal::serde::float")]
    delivery_cost: Decimal,
    total_delivery_cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_committent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    single_sided_type: Option<u8>,
    is_valid: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WaybillDoc<'a> {
    waybill_no: &'a str,
    waybill_date: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PartyWire<'a> {
    tin_or_pinfl: &'a str,
    name: &'a str,
    branch_code: &'a str,
    branch_name: &'a str,
}

impl<'a> From<&'a WaybillParty> for PartyWire<'a> {
    fn from(p: &'a WaybillParty) -> Self {
        Self {
            tin_or_pinfl: &p.tin_or_pinfl,
            name: &p.name,
            branch_code: or_empty(&p.branch_code),
            branch_name: or_empty(&p.branch_name),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PersonWire<'a> {
    pinfl: &'a str,
    full_name: &'a str,
}

impl<'a> From<&'a Person> for PersonWire<'a> {
    fn from(p: &'a Person) -> Self {
        Self {
            pinfl: &p.pinfl,
            full_name: &p.full_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VehicleWire<'a> {
    reg_no: &'a str,
    model: &'a str,
}

impl<'a> From<&'a Vehicle> for VehicleWire<'a> {
    fn from(v: &'a Vehicle) -> Self {
        Self {
            reg_no: &v.reg_no,
            model: &v.model,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TransportWire<'a> {
    truck: VehicleWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailer: Option<VehicleWire<'a>>,
    driver: PersonWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PointWire<'a> {
    region_id: &'a str,
    district_id: &'a str,
    address: &'a str,
    longitude: f64,
    latitude: f64,
}

impl<'a> From<&'a Point> for PointWire<'a> {
    fn from(p: &'a Point) -> Self {
        Self {
            region_id: &p.region_id,
            district_id: &p.district_id,
            address: or_empty(&p.address),
            longitude: p.longitude.unwrap_or(0.0),
            latitude: p.latitude.unwrap_or(0.0),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GroupWire<'a> {
    ord_no: usize,
    loading_point: PointWire<'a>,
    unloading_point: PointWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loading_trustee: Option<PersonWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unloading_trustee: Option<PersonWire<'a>>,
    product_info: ProductInfoWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductInfoWire<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    total_delivery_sum: Decimal,
    products: Vec<ProductWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProductWire<'a> {
    ord_no: usize,
    committent_tin_or_pinfl: &'a str,
    committent_name: &'a str,
    product_name: &'a str,
    catalog_code: &'a str,
    catalog_name: &'a str,
    package_code: &'a str,
    package_name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    count: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    delivery_sum: Decimal,
    weight_brutto: f64,
    weight_netto: f64,
}

fn group_wire(index: usize, group: &ProductGroup, price_per_km: Decimal) -> Result<GroupWire<'_>, BuildError> {
    let products = group
        .products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let count = amount(DOCUMENT, "products.count", p.count)?;
            let price = amount(DOCUMENT, "products.price", p.price)?;
            let total = in_range(DOCUMENT, "products.amount", count.checked_mul(price))?;
            let delivery_sum = total
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|v| v.checked_mul(price_per_km))
                .and_then(js_round);
            Ok(ProductWire {
                ord_no: i + 1,
                committent_tin_or_pinfl: or_empty(&p.committent_tin_or_pinfl),
                committent_name: or_empty(&p.committent_name),
                product_name: &p.product_name,
                catalog_code: or_empty(&p.catalog_code),
                catalog_name: or_empty(&p.catalog_name),
                package_code: or_empty(&p.package_code),
                package_name: or_empty(&p.package_name),
                count,
                price,
                amount: total,
                delivery_sum: in_range(DOCUMENT, "products.delivery_sum", delivery_sum)?,
                weight_brutto: p.weight_brutto.unwrap_or(0.0),
                weight_netto: p.weight_netto.unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    let total_delivery_sum = products
        .iter()
        .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(p.delivery_sum));

    Ok(GroupWire {
        ord_no: index + 1,
        loading_point: PointWire::from(&group.loading_point),
        unloading_point: PointWire::from(&group.unloading_point),
        loading_trustee: group.loading_trustee.as_ref().map(PersonWire::from),
        unloading_trustee: group.unloading_trustee.as_ref().map(PersonWire::from),
        product_info: ProductInfoWire {
            total_delivery_sum: in_range(DOCUMENT, "products.total_delivery_sum", total_delivery_sum)?,
            products,
        },
    })
}

// -- Builder ------------------------------------------------------------------

/// Builder for transport waybill payloads.
#[derive(Debug, Clone, Default)]
pub struct WaybillBuilder {
    base: PayloadAccumulator,
    draft: WaybillDraft,
}

impl WaybillBuilder {
    /// Start a waybill, optionally seeded with a partial payload.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            base: PayloadAccumulator::new(initial),
            draft: WaybillDraft::default(),
        }
    }

    /// Set the waybill number, date and delivery type.
    pub fn header(mut self, header: WaybillHeader) -> Self {
        self.draft.header = Some(header);
        self
    }

    /// Reference the carriage contract.
    pub fn contract(mut self, contract: ContractRef) -> Self {
        self.draft.contract = Some(contract);
        self
    }

    /// Set the shipper.
    pub fn consignor(mut self, party: WaybillParty) -> Self {
        self.draft.consignor = Some(party);
        self
    }

    /// Set the receiver.
    pub fn consignee(mut self, party: WaybillParty) -> Self {
        self.draft.consignee = Some(party);
        self
    }

    /// Set the carrier.
    pub fn carrier(mut self, party: WaybillParty) -> Self {
        self.draft.carrier = Some(party);
        self
    }

    /// Set the freight forwarder. Omitted from the payload when unset.
    pub fn freight_forwarder(mut self, party: WaybillParty) -> Self {
        self.draft.freight_forwarder = Some(party);
        self
    }

    /// Set the ordering client. Omitted from the payload when unset.
    pub fn client(mut self, party: WaybillParty) -> Self {
        self.draft.client = Some(party);
        self
    }

    /// Set the paying party. Omitted from the payload when unset.
    pub fn payer(mut self, party: WaybillParty) -> Self {
        self.draft.payer = Some(party);
        self
    }

    /// Set the person responsible for the shipment.
    pub fn responsible_person(mut self, person: Person) -> Self {
        self.draft.responsible_person = Some(person);
        self
    }

    /// Set the truck, optional trailer and driver.
    pub fn transport(mut self, transport: Transport) -> Self {
        self.draft.transport = Some(transport);
        self
    }

    /// Set the distance and per-kilometre tariff used for delivery sums.
    pub fn totals(mut self, totals: WaybillTotals) -> Self {
        self.draft.totals = Some(totals);
        self
    }

    /// Mark whether products are shipped on behalf of a committent.
    pub fn has_committent(mut self, value: bool) -> Self {
        self.draft.has_committent = Some(value);
        self
    }

    /// Set the platform single-sided waybill code.
    pub fn single_sided_type(mut self, value: u8) -> Self {
        self.draft.single_sided_type = Some(value);
        self
    }

    /// Configure a product group with a fresh [`ProductGroupBuilder`] and
    /// append it.
    ///
    /// The group is validated immediately. An invalid group is kept in
    /// place and reported by [`DocumentBuilder::build`].
    pub fn add_product_group<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ProductGroupBuilder) -> ProductGroupBuilder,
    {
        let index = self.draft.groups.len();
        let group = configure(ProductGroupBuilder::new()).build();
        if let Err(ref e) = group {
            tracing::warn!(document = %DOCUMENT, index, error = %e, "invalid waybill product group");
        }
        self.draft.groups.push(group);
        self
    }

    /// Append an already built group.
    pub fn product_group(mut self, group: ProductGroup) -> Self {
        self.draft.groups.push(Ok(group));
        self
    }

    /// Unchecked override, merged shallowly over the generated payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for WaybillBuilder {
    fn document_type(&self) -> DocumentType {
        DOCUMENT
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let draft = &self.draft;
        let header = require(DOCUMENT, "header", &draft.header)?;
        let consignor = require(DOCUMENT, "consignor", &draft.consignor)?;
        let consignee = require(DOCUMENT, "consignee", &draft.consignee)?;
        let carrier = require(DOCUMENT, "carrier", &draft.carrier)?;
        let transport = require(DOCUMENT, "transport", &draft.transport)?;
        let totals = require(DOCUMENT, "totals", &draft.totals)?;
        let responsible = require(DOCUMENT, "responsible_person", &draft.responsible_person)?;
        let groups = require_items(DOCUMENT, "product_groups", &draft.groups)?;

        let distance = amount(DOCUMENT, "totals.distance_km", totals.distance_km)?;
        let price_per_km = amount(DOCUMENT, "totals.price_per_km", totals.price_per_km)?;
        let total_delivery_cost = in_range(
            DOCUMENT,
            "totals.total_delivery_cost",
            distance.checked_mul(price_per_km),
        )?;

        let product_groups = groups
            .iter()
            .enumerate()
            .map(|(index, group)| match group {
                Ok(group) => group_wire(index, group, price_per_km),
                Err(e) => Err(BuildError::InvalidProductGroup {
                    document: DOCUMENT,
                    index,
                    source: Box::new(e.clone()),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let wire = WaybillPayload {
            waybill_doc: WaybillDoc {
                waybill_no: &header.number,
                waybill_date: &header.date,
            },
            delivery_type: header.delivery_type,
            contract_doc: draft.contract.as_ref().map(ContractDoc::from),
            consignor: PartyWire::from(consignor),
            consignee: PartyWire::from(consignee),
            carrier: PartyWire::from(carrier),
            freight_forwarder: draft.freight_forwarder.as_ref().map(PartyWire::from),
            client: draft.client.as_ref().map(PartyWire::from),
            payer: draft.payer.as_ref().map(PartyWire::from),
            responsible_person: PersonWire::from(responsible),
            transport: TransportWire {
                truck: VehicleWire::from(&transport.truck),
                trailer: transport.trailer.as_ref().map(VehicleWire::from),
                driver: PersonWire::from(&transport.driver),
            },
            product_groups,
            total_distance: fixed2(distance),
            delivery_cost: price_per_km,
            total_delivery_cost: fixed2(total_delivery_cost),
            has_committent: draft.has_committent,
            single_sided_type: draft.single_sided_type,
            is_valid: true,
        };

        finish(DOCUMENT, &wire, &self.base, MergeStrategy::Shallow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn party(id: &str) -> WaybillParty {
        WaybillParty {
            tin_or_pinfl: id.into(),
            name: format!("Party {id}"),
            ..Default::default()
        }
    }

    fn point(address: &str) -> Point {
        Point {
            region_id: "26".into(),
            district_id: "2603".into(),
            address: Some(address.into()),
            ..Default::default()
        }
    }

    fn product(name: &str, count: f64, price: f64) -> WaybillProduct {
        WaybillProduct {
            product_name: name.into(),
            count,
            price,
            ..Default::default()
        }
    }

    fn base() -> WaybillBuilder {
        WaybillBuilder::new(None)
            .header(WaybillHeader {
                number: "W-1".into(),
                date: "2025-02-07".into(),
                delivery_type: 2,
            })
            .consignor(party("123456789"))
            .consignee(party("987654321"))
            .carrier(party("12345678901234"))
            .responsible_person(Person {
                pinfl: "12345678901234".into(),
                full_name: "Responsible".into(),
            })
            .transport(Transport {
                truck: Vehicle {
                    reg_no: "01A123BC".into(),
                    model: "MAN".into(),
                },
                trailer: None,
                driver: Person {
                    pinfl: "11111111111111".into(),
                    full_name: "Driver".into(),
                },
            })
            .totals(WaybillTotals {
                distance_km: 120.0,
                price_per_km: 10000.0,
            })
    }

    fn with_group(builder: WaybillBuilder) -> WaybillBuilder {
        builder.add_product_group(|g| {
            g.loading_point(point("Depot"))
                .unloading_point(point("Store"))
                .product(product("Cement", 10.0, 50.0))
        })
    }

    #[test]
    fn totals_are_formatted() {
        let p = with_group(base()).build().unwrap();
        assert_eq!(p["TotalDistance"], json!("120.00"));
        assert_eq!(p["TotalDeliveryCost"], json!("1200000.00"));
        assert_eq!(p["DeliveryCost"].as_f64(), Some(10000.0));
        assert_eq!(p["IsValid"], json!(true));
        assert_eq!(p["DeliveryType"], json!(2));
    }

    #[test]
    fn delivery_sum_uses_per_km_tariff() {
        let p = base()
            .totals(WaybillTotals {
                distance_km: 10.0,
                price_per_km: 3.0,
            })
            .add_product_group(|g| {
                g.loading_point(point("A"))
                    .unloading_point(point("B"))
                    .product(product("x", 10.0, 50.0))
                    .product(product("y", 1.0, 50.0))
            })
            .build()
            .unwrap();
        let info = &p["ProductGroups"][0]["ProductInfo"];
        // 500 / 100 * 3 = 15
        assert_eq!(info["Products"][0]["Amount"].as_f64(), Some(500.0));
        assert_eq!(info["Products"][0]["DeliverySum"].as_f64(), Some(15.0));
        // 50 / 100 * 3 = 1.5, rounded up
        assert_eq!(info["Products"][1]["DeliverySum"].as_f64(), Some(2.0));
        assert_eq!(info["TotalDeliverySum"].as_f64(), Some(17.0));
    }

    #[test]
    fn groups_and_products_numbered_by_position() {
        let p = with_group(with_group(base()))
            .add_product_group(|g| {
                g.loading_point(point("C"))
                    .unloading_point(point("D"))
                    .product(product("a", 1.0, 1.0))
                    .product(WaybillProduct {
                        ord_no: Some(9),
                        ..product("b", 1.0, 1.0)
                    })
            })
            .build()
            .unwrap();
        let groups = p["ProductGroups"].as_array().unwrap();
        assert_eq!(groups.len(), 3);
        for (i, g) in groups.iter().enumerate() {
            assert_eq!(g["OrdNo"], json!(i + 1));
        }
        assert_eq!(groups[2]["ProductInfo"]["Products"][1]["OrdNo"], json!(2));
    }

    #[test]
    fn optional_parties_and_trailer_only_when_set() {
        let p = with_group(base()).build().unwrap();
        assert!(!p.contains_key("FreightForwarder"));
        assert!(!p.contains_key("Client"));
        assert!(!p.contains_key("Payer"));
        assert!(!p.contains_key("HasCommittent"));
        assert!(!p.contains_key("SingleSidedType"));
        assert!(p["Transport"].get("Trailer").is_none());

        let p = with_group(base())
            .payer(party("555555555"))
            .has_committent(true)
            .single_sided_type(1)
            .build()
            .unwrap();
        assert_eq!(p["Payer"]["TinOrPinfl"], json!("555555555"));
        assert_eq!(p["Payer"]["BranchCode"], json!(""));
        assert_eq!(p["HasCommittent"], json!(true));
        assert_eq!(p["SingleSidedType"], json!(1));
    }

    #[test]
    fn point_defaults() {
        let p = base()
            .add_product_group(|g| {
                g.loading_point(Point::default())
                    .unloading_point(point("B"))
                    .product(product("x", 1.0, 1.0))
            })
            .build()
            .unwrap();
        let loading = &p["ProductGroups"][0]["LoadingPoint"];
        assert_eq!(loading["Address"], json!(""));
        assert_eq!(loading["Longitude"].as_f64(), Some(0.0));
        assert!(p["ProductGroups"][0].get("LoadingTrustee").is_none());
    }

    #[test]
    fn invalid_group_surfaces_at_build() {
        let builder = base().add_product_group(|g| g.loading_point(point("A")).product(product("x", 1.0, 1.0)));
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidProductGroup {
                document: DocumentType::TransportWaybill,
                index: 0,
                source: Box::new(BuildError::MissingRequiredSection {
                    document: DocumentType::TransportWaybill,
                    section: "unloading_point",
                }),
            }
        );
    }

    #[test]
    fn group_without_products_is_rejected() {
        let err = ProductGroupBuilder::new()
            .loading_point(point("A"))
            .unloading_point(point("B"))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::EmptyRequiredList { list: "products", .. }));
    }

    #[test]
    fn requires_groups_and_totals() {
        let err = base().build().unwrap_err();
        assert!(matches!(err, BuildError::EmptyRequiredList { list: "product_groups", .. }));

        let err = WaybillBuilder::new(None)
            .header(WaybillHeader::default())
            .consignor(party("1"))
            .consignee(party("2"))
            .carrier(party("3"))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingRequiredSection { section: "transport", .. }));
    }

    #[test]
    fn overflowing_totals_fail_instead_of_panicking() {
        let err = with_group(base().totals(WaybillTotals {
            distance_km: 1e15,
            price_per_km: 1e15,
        }))
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::AmountOutOfRange {
                document: DocumentType::TransportWaybill,
                field: "totals.total_delivery_cost"
            }
        );

        let err = with_group(base().totals(WaybillTotals {
            distance_km: 1e30,
            price_per_km: 1.0,
        }))
        .build()
        .unwrap_err();
        assert!(matches!(err, BuildError::AmountOutOfRange { field: "totals.distance_km", .. }));
    }

    #[test]
    fn overflowing_product_amount_fails_instead_of_panicking() {
        let err = base()
            .add_product_group(|g| {
                g.loading_point(point("A"))
                    .unloading_point(point("B"))
                    .product(product("Huge", 1e15, 1e15))
            })
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::AmountOutOfRange {
                document: DocumentType::TransportWaybill,
                field: "products.amount"
            }
        );
    }

    #[test]
    fn raw_merge_is_shallow() {
        let p = with_group(base())
            .raw(json!({"Transport": {"Truck": {"RegNo": "X"}}, "IsValid": false}))
            .build()
            .unwrap();
        assert_eq!(p["Transport"], json!({"Truck": {"RegNo": "X"}}));
        assert_eq!(p["IsValid"], json!(false));
    }
}
