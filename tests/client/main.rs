//! Client Tests
//!
//! End-to-end tests for the odoo-api client over an in-memory server that
//! speaks XML-RPC through the wire codec:
//! - Authentication and the `execute_kw` wire shape
//! - Record operations (create, read, write, unlink, actions)
//! - Tabular output, many-to-one destructuring and JSON export
//! - Credential configuration

mod common;

mod config;
mod data;
mod records;
mod wire;
