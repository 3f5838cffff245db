//! End-to-end builder scenarios through the public API.

use didox_core::{DocumentDate, DocumentType};
use didox_documents::builders::act::{ActHeader, ActParty, ActProduct};
use didox_documents::builders::empowerment::{Agent, Company, EmpowermentHeader};
use didox_documents::builders::invoice::{InvoiceHeader, InvoiceParty, InvoiceProduct};
use didox_documents::builders::waybill::{
    Person, Point, Transport, Vehicle, WaybillHeader, WaybillParty, WaybillProduct, WaybillTotals,
};
use didox_documents::{builder_by_name, builders, BuildError, DocumentBuilder, Payload, VatFlags};
use serde_json::json;

fn today() -> String {
    DocumentDate::today().into()
}

#[test]
fn act_with_vat_produces_string_amounts() {
    let payload = builders::act(None)
        .header(ActHeader {
            number: "ACT-001".into(),
            date: DocumentDate::from_ymd(2025, 2, 7).unwrap().into(),
            text: "Monthly maintenance".into(),
        })
        .seller(ActParty {
            tin: "123456789".into(),
            name: "Service LLC".into(),
            ..Default::default()
        })
        .buyer(ActParty {
            tin: "987654321".into(),
            name: "Client LLC".into(),
            ..Default::default()
        })
        .product(ActProduct {
            name: "Maintenance".into(),
            count: 10.0,
            price: 1000.0,
            vat_rate: Some(12.0),
            ..Default::default()
        })
        .flags(VatFlags { has_vat: true })
        .build()
        .unwrap();

    assert_eq!(payload["ActDoc"]["ActDate"], json!("2025-02-07"));
    let line = &payload["ProductList"]["Products"][0];
    assert_eq!(line["TotalSumWithoutVat"], json!("10000.00"));
    assert_eq!(line["VatSum"], json!("1200.00"));
    assert_eq!(line["TotalSum"], json!("11200.00"));
    assert_eq!(line["WithoutVat"], json!(false));
}

#[test]
fn empowerment_without_products_names_the_list() {
    let err = builders::empowerment(None)
        .header(EmpowermentHeader {
            number: "E-1".into(),
            date_of_issue: today(),
            date_of_expire: today(),
        })
        .agent(Agent {
            tin: "12345678901234".into(),
            fio: "Agent".into(),
            ..Default::default()
        })
        .seller(Company {
            tin: "123456789".into(),
            name: "Seller".into(),
            ..Default::default()
        })
        .buyer(Company {
            tin: "987654321".into(),
            name: "Buyer".into(),
            ..Default::default()
        })
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::EmptyRequiredList {
            document: DocumentType::Empowerment,
            list: "products"
        }
    );
    assert_eq!(err.to_string(), "empowerment: required list `products` is empty");
}

#[test]
fn waybill_total_delivery_cost() {
    let payload = builders::waybill(None)
        .header(WaybillHeader {
            number: "TTN-1".into(),
            date: today(),
            delivery_type: 2,
        })
        .consignor(WaybillParty {
            tin_or_pinfl: "123456789".into(),
            name: "Factory".into(),
            ..Default::default()
        })
        .consignee(WaybillParty {
            tin_or_pinfl: "987654321".into(),
            name: "Warehouse".into(),
            ..Default::default()
        })
        .carrier(WaybillParty {
            tin_or_pinfl: "111111111".into(),
            name: "Trucking".into(),
            ..Default::default()
        })
        .responsible_person(Person {
            pinfl: "12345678901234".into(),
            full_name: "Dispatcher".into(),
        })
        .transport(Transport {
            truck: Vehicle {
                reg_no: "01A777AA".into(),
                model: "Isuzu".into(),
            },
            trailer: Some(Vehicle {
                reg_no: "01B123".into(),
                model: "Schmitz".into(),
            }),
            driver: Person {
                pinfl: "22222222222222".into(),
                full_name: "Driver".into(),
            },
        })
        .totals(WaybillTotals {
            distance_km: 120.0,
            price_per_km: 10000.0,
        })
        .add_product_group(|g| {
            g.loading_point(Point {
                region_id: "26".into(),
                district_id: "2603".into(),
                ..Default::default()
            })
            .unloading_point(Point {
                region_id: "27".into(),
                district_id: "2701".into(),
                ..Default::default()
            })
            .product(WaybillProduct {
                product_name: "Cement".into(),
                count: 20.0,
                price: 50000.0,
                ..Default::default()
            })
        })
        .build()
        .unwrap();

    assert_eq!(payload["TotalDeliveryCost"], json!("1200000.00"));
    assert_eq!(payload["Transport"]["Trailer"]["RegNo"], json!("01B123"));
}

#[test]
fn shallow_and_deep_builders_treat_nested_overrides_differently() {
    let invoice = builders::invoice(None)
        .header(InvoiceHeader::default())
        .seller(InvoiceParty {
            tin: "123456789".into(),
            name: "Seller".into(),
            ..Default::default()
        })
        .buyer(InvoiceParty {
            tin: "987654321".into(),
            name: "Buyer".into(),
            ..Default::default()
        })
        .product(InvoiceProduct {
            name: "x".into(),
            count: 1.0,
            price: 1.0,
            ..Default::default()
        })
        .raw(json!({"Seller": {"Director": "Override"}}))
        .build()
        .unwrap();
    assert_eq!(invoice["Seller"], json!({"Director": "Override"}));

    let empowerment = builders::empowerment(None)
        .header(EmpowermentHeader::default())
        .agent(Agent::default())
        .seller(Company {
            tin: "123456789".into(),
            name: "Seller".into(),
            ..Default::default()
        })
        .buyer(Company::default())
        .product(Default::default())
        .raw(json!({"Seller": {"Director": "Override"}}))
        .build()
        .unwrap();
    assert_eq!(empowerment["Seller"]["Director"], json!("Override"));
    assert_eq!(empowerment["Seller"]["Name"], json!("Seller"));
}

#[test]
fn initial_partial_seeds_overrides() {
    let initial = Payload::from_value(json!({"ContractDoc": {"ContractNo": "FROM-INIT"}})).unwrap();
    let payload = builders::empowerment(Some(initial))
        .header(EmpowermentHeader::default())
        .agent(Agent::default())
        .seller(Company::default())
        .buyer(Company::default())
        .product(Default::default())
        .build()
        .unwrap();
    assert_eq!(payload.pointer("/ContractDoc/ContractNo"), Some(&json!("FROM-INIT")));
    assert_eq!(payload.pointer("/ContractDoc/ContractDate"), Some(&json!("")));
}

#[test]
fn later_raw_calls_win_per_top_level_key() {
    let payload = builders::contract(None)
        .raw(json!({"A": {"x": 1}, "B": 1}))
        .raw(json!({"A": {"y": 2}}))
        .build()
        .unwrap();
    assert_eq!(payload["A"], json!({"y": 2}));
    assert_eq!(payload["B"], json!(1));
}

#[test]
fn returned_payload_is_detached_from_builder() {
    let builder = builders::hybrid_invoice(None).raw(json!({"Field": "original"}));
    let mut first = builder.build().unwrap();
    first.insert("Field", json!("mutated"));
    assert_eq!(builder.build().unwrap()["Field"], json!("original"));
}

#[test]
fn drafts_load_from_camel_case_json() {
    let header: InvoiceHeader = serde_json::from_value(json!({"number": "7", "date": "2025-01-01"})).unwrap();
    let product: InvoiceProduct =
        serde_json::from_value(json!({"name": "Tea", "count": 3, "price": 2.5, "vatRate": 12, "catalogCode": "0901"}))
            .unwrap();
    assert_eq!(header.number, "7");
    assert_eq!(product.vat_rate, Some(12.0));
    assert_eq!(product.catalog_code.as_deref(), Some("0901"));
}

#[test]
fn registry_builders_drive_without_concrete_types() {
    let mut builder = builder_by_name("pharmacy_invoice", None).unwrap();
    builder.merge_raw(json!({"Items": []}));
    assert_eq!(builder.document_type().code(), "008");
    assert_eq!(builder.build().unwrap()["Items"], json!([]));
}
