//! odoo-api - typed client for the Odoo XML-RPC object API
//!
//! Every model operation is one `execute_kw` round trip against a remote
//! Odoo server, addressed by model name, method name, positional arguments
//! and keyword arguments.
//!
//! # Quick Start
//!
//! ```ignore
//! use odoo_api::{Client, ClientOptions, ComparisonOperator, Criteria, Many2OneMode};
//!
//! // ODOO_API_URL, ODOO_API_DB, ODOO_API_USERNAME, ODOO_API_TOKEN (or .env)
//! let client = Client::connect(ClientOptions::new())?;
//!
//! let companies = Criteria::filter("is_company", ComparisonOperator::Eq, true);
//! let count = client.search_count("res.partner", Some(companies))?;
//!
//! let orders = client.dataset(
//!     "sale.order",
//!     None,
//!     Some(&["name", "partner_id"]),
//!     None,
//!     Some(20),
//!     Many2OneMode::Pair,
//! )?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which turns a [`Command`]
//! into one remote call. The [`Client`] struct provides the typed surface
//! on top of it. The XML-RPC codec and HTTP transport live in `odoo-wire`
//! and are reachable through the [`Transport`] trait.

// Re-export the public API from odoo-executor
pub use odoo_executor::*;
