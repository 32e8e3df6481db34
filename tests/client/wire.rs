//! Wire-Level Tests
//!
//! Tests that calls reach the server as well-formed XML-RPC documents and
//! that faults come back as transport errors.

use crate::common::*;
use odoo_api::{Client, Credentials, Error, TransportError, Value};
use odoo_wire::codec;

#[test]
fn authenticate_then_execute_kw() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);
    client.search("res.partner", None, None, None).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("<methodName>authenticate</methodName>"));
    assert!(requests[1].contains("<methodName>execute_kw</methodName>"));
}

#[test]
fn execute_kw_params_decode_in_order() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);
    client
        .search("res.partner", None, Some(0), Some(1))
        .unwrap();

    let requests = server.requests();
    let (method, params) = codec::decode_call(requests.last().unwrap()).unwrap();
    assert_eq!(method, "execute_kw");
    assert_eq!(params.len(), 7);
    assert_eq!(params[0], Value::from(DATABASE));
    assert_eq!(params[1], Value::Int(UID));
    assert_eq!(params[2], Value::from(TOKEN));
    assert_eq!(params[3], Value::from("res.partner"));
    assert_eq!(params[4], Value::from("search"));
    assert_eq!(params[5], Value::Array(vec![Value::Array(vec![])]));

    let kwargs = params[6].as_object().unwrap();
    assert_eq!(kwargs.keys().collect::<Vec<_>>(), vec!["offset", "limit"]);
    assert_eq!(kwargs["offset"], Value::Int(0));
    assert_eq!(kwargs["limit"], Value::Int(1));
}

#[test]
fn rejected_login_is_authentication_error() {
    let server = FakeOdoo::seeded();
    let credentials = Credentials::new("https://acme.odoo.com", DATABASE, USERNAME, "wrong");

    let result = Client::with_transport(server.clone(), credentials, Default::default());
    assert!(matches!(result, Err(Error::AuthenticationFailed { .. })));
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn unknown_method_is_remote_fault() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let err = client
        .execute("sale.order", "action_does_not_exist", 1i64, None)
        .unwrap_err();
    match err {
        Error::Transport(TransportError::Fault { code, message }) => {
            assert_eq!(code, "2");
            assert!(message.contains("action_does_not_exist"));
        }
        other => panic!("expected remote fault, got {:?}", other),
    }
}

#[test]
fn server_version_round_trip() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let version = client.server_version().unwrap();
    let version = version.as_object().unwrap();
    assert_eq!(version["server_version"], Value::from("17.0"));
    assert!(server
        .requests()
        .last()
        .unwrap()
        .contains("<methodName>version</methodName>"));
}

#[test]
fn token_never_in_session_info() {
    let server = FakeOdoo::seeded();
    let client = connect(&server);

    let info = client.session_info();
    assert!(info.starts_with("Database: acme"));
    assert!(!info.contains(TOKEN));
    assert!(!format!("{:?}", client.session()).contains(TOKEN));
}
