//! Record Operation Tests
//!
//! Tests create/read/write/unlink, searches and model actions against the
//! in-memory server.

use crate::common::*;
use indexmap::IndexMap;
use odoo_api::{
    AccessRight, ComparisonOperator, Criteria, Error, LogicOperator, ModelActions, OutputMode,
    RecordData, Triplet, Value,
};

fn partner(name: &str) -> RecordData {
    let mut data = IndexMap::new();
    data.insert("name".to_string(), Value::from(name));
    data.insert("is_company".to_string(), Value::Bool(true));
    data
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn create_read_write_unlink() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let id = client.create("res.partner", partner("Globex")).unwrap();
    assert!(server.record("res.partner", id).is_some());

    let name = client.get_value("res.partner", id, "name").unwrap();
    assert_eq!(name, Some(Value::from("Globex")));

    let mut update = IndexMap::new();
    update.insert("name".to_string(), Value::from("Globex Corp"));
    assert!(client.write("res.partner", id, update).unwrap());
    assert_eq!(
        server.record("res.partner", id).unwrap()["name"],
        Value::from("Globex Corp")
    );

    assert!(client.unlink("res.partner", id).unwrap());
    assert!(server.record("res.partner", id).is_none());
    assert_eq!(client.get_value("res.partner", id, "name").unwrap(), None);
}

#[test]
fn create_many_returns_ids_in_order() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let ids = client
        .create_many("res.partner", vec![partner("A"), partner("B"), partner("C")])
        .unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        server.record("res.partner", ids[1]).unwrap()["name"],
        Value::from("B")
    );
}

#[test]
fn write_many_records() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let mut update = IndexMap::new();
    update.insert("state".to_string(), Value::from("cancel"));
    assert!(client.write("sale.order", vec![1, 2], update).unwrap());

    let cancelled = client
        .search_count(
            "sale.order",
            Some(Criteria::filter("state", ComparisonOperator::Eq, "cancel")),
        )
        .unwrap();
    assert_eq!(cancelled, 2);
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn search_with_criteria() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let companies = client
        .search(
            "res.partner",
            Some(Criteria::filter("is_company", ComparisonOperator::Eq, true)),
            None,
            None,
        )
        .unwrap();
    assert_eq!(companies, vec![7]);
}

#[test]
fn search_pagination() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    assert_eq!(
        client.search("sale.order", None, Some(1), None).unwrap(),
        vec![2]
    );
    assert_eq!(
        client.search("sale.order", None, None, Some(1)).unwrap(),
        vec![1]
    );
    // limit zero is sent and honoured by the server
    assert!(client
        .search("sale.order", None, None, Some(0))
        .unwrap()
        .is_empty());
}

#[test]
fn search_by_many2one_id() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let criteria = Criteria::new()
        .push(LogicOperator::And)
        .push(Triplet::new("partner_id", ComparisonOperator::Eq, 7i64))
        .push(Triplet::new(
            "state",
            ComparisonOperator::In,
            vec!["draft", "sent"],
        ));
    assert_eq!(
        client.search("sale.order", Some(criteria), None, None).unwrap(),
        vec![1]
    );
}

#[test]
fn search_read_fields_and_shape() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let output = client
        .search_read(
            "sale.order",
            None,
            Some(&["name", "state"]),
            None,
            None,
            Some(OutputMode::Dict),
        )
        .unwrap();
    let records = output.as_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].keys().collect::<Vec<_>>(),
        vec!["id", "name", "state"]
    );

    let table = client
        .search_read("sale.order", None, Some(&["name"]), None, None, None)
        .unwrap()
        .into_table();
    assert_eq!(table.column_names(), vec!["id", "name"]);
}

#[test]
fn read_reference_field() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let records = client
        .read("sale.order", vec![1, 2], None, Some(OutputMode::Dict))
        .unwrap()
        .into_records();

    let linked = records[0].reference("partner_id").unwrap();
    assert!(linked.is_linked());
    assert_eq!(linked.id(), &Value::Int(7));
    assert_eq!(linked.name(), &Value::from("Acme"));

    let empty = records[1].reference("partner_id").unwrap();
    assert!(!empty.is_linked());
}

#[test]
fn check_access_rights_answer() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    assert!(client
        .check_access_rights("sale.order", AccessRight::Write, None)
        .unwrap());
    assert!(!client
        .check_access_rights("account.move", AccessRight::Create, Some(false))
        .unwrap());
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn confirm_order_through_actions_extension() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let actions = client.extension::<ModelActions>(ModelActions::NAME).unwrap();
    assert_eq!(actions.actions_for("sale.order"), vec!["confirm"]);

    let result = actions.run(&client, "sale.order", "confirm", 1i64).unwrap();
    assert_eq!(result, Value::Bool(true));
    assert_eq!(
        server.record("sale.order", 1).unwrap()["state"],
        Value::from("sale")
    );
}

#[test]
fn window_action_is_not_supported() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let err = client
        .execute("sale.order", "action_view_invoice", 1i64, None)
        .unwrap_err();
    assert!(matches!(err, Error::NotSupported { .. }));
}
