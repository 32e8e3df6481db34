//! Data Helper Tests
//!
//! Tests dataset retrieval, many-to-one destructuring, field metadata and
//! JSON export.

use crate::common::*;
use odoo_api::json::{records_to_json, table_to_json};
use odoo_api::{ClientOptions, ComparisonOperator, Criteria, Many2OneMode, OutputMode, Value};

#[test]
fn dataset_splits_references() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let table = client
        .dataset(
            "sale.order",
            None,
            Some(&["name", "partner_id"]),
            None,
            None,
            Many2OneMode::Pair,
        )
        .unwrap();

    assert_eq!(
        table.column_names(),
        vec!["id", "name", "partner_id", "partner_name"]
    );
    assert_eq!(table.cell(0, "partner_id"), Some(&Value::Int(7)));
    assert_eq!(table.cell(0, "partner_name"), Some(&Value::from("Acme")));
    assert_eq!(table.cell(1, "partner_id"), Some(&Value::Bool(false)));
}

#[test]
fn dataset_name_only() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let table = client
        .dataset(
            "sale.order",
            None,
            Some(&["partner_id"]),
            None,
            None,
            Many2OneMode::NameOnly,
        )
        .unwrap();
    assert_eq!(table.column_names(), vec!["id", "partner_name"]);
}

#[test]
fn dataset_without_matches_has_requested_columns() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let table = client
        .dataset(
            "sale.order",
            Some(Criteria::filter("state", ComparisonOperator::Eq, "cancel")),
            Some(&["name", "partner_id"]),
            None,
            None,
            Many2OneMode::Pair,
        )
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_names(), vec!["id", "name", "partner_id"]);
}

#[test]
fn model_fields_for_named_fields() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let fields = client
        .model_fields("sale.order", None, Some(&["partner_id"]), None)
        .unwrap()
        .into_table();
    assert_eq!(fields.num_rows(), 1);
    assert_eq!(fields.cell(0, "ttype"), Some(&Value::from("many2one")));
    assert_eq!(fields.cell(0, "relation"), Some(&Value::from("res.partner")));

    let all = client
        .model_fields("sale.order", Some(&["name"]), None, Some(OutputMode::Dict))
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn get_values_follow_request_order() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let values = client
        .get_values("sale.order", 1, &["state", "name"])
        .unwrap()
        .unwrap();
    assert_eq!(values, vec![Value::from("draft"), Value::from("S00001")]);
}

#[test]
fn table_json_export() {
    let server = FakeOdoo::seeded();
    let client = connect_with(&server, ClientOptions::new().default_output(OutputMode::Table));

    let table = client
        .dataset(
            "sale.order",
            None,
            Some(&["name", "partner_id"]),
            None,
            Some(1),
            Many2OneMode::Pair,
        )
        .unwrap();

    let json = table_to_json(&table);
    assert_eq!(
        json,
        serde_json::json!({
            "columns": ["id", "name", "partner_id", "partner_name"],
            "rows": [[1, "S00001", 7, "Acme"]],
        })
    );
}

#[test]
fn records_json_keeps_field_order() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let records = client
        .read("res.partner", 7i64, Some(&["name", "is_company"]), Some(OutputMode::Dict))
        .unwrap()
        .into_records();
    let json = records_to_json(&records);
    assert_eq!(
        serde_json::to_string(&json).unwrap(),
        r#"[{"id":7,"name":"Acme","is_company":true}]"#
    );
}
