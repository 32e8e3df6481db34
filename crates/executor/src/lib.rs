//! # Odoo Executor
//!
//! Typed client for the Odoo XML-RPC object API.
//!
//! This is the crate users import. It provides:
//! - [`Client`] - the typed operation surface
//! - [`Params`] - positional/keyword argument builder for `execute_kw`
//! - [`Command`]/[`Output`] - the low-level instruction set run by [`Executor`]
//! - [`Table`] and [`destructure`] - tabular output and many-to-one reshaping
//!
//! ## Quick Start
//!
//! ```text
//! use odoo_executor::{Client, ClientOptions, Many2OneMode};
//!
//! // Credentials come from ODOO_API_* variables (or .env)
//! let client = Client::connect(ClientOptions::new())?;
//!
//! let ids = client.search("res.partner", None, None, Some(10))?;
//! let table = client.dataset("sale.order", None, None, None, None, Many2OneMode::Pair)?;
//! ```
//!
//! ## Request pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | Build args/kwargs | [`Params`] |
//! | One `execute_kw` round trip | [`Executor::dispatch`] |
//! | Records or table | [`ReadOutput`], [`OutputMode`] |
//! | Split `[id, label]` columns | [`destructure()`], [`Many2OneMode`] |

#![warn(missing_docs)]

mod api;
mod command;
mod config;
pub mod destructure;
mod error;
mod executor;
mod extensions;
pub mod json;
pub mod legacy;
mod output;
mod params;
mod session;
mod table;
mod types;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::Client;
pub use command::{Command, ListOrItem, RecordData};
pub use config::{
    ClientOptions, Config, DatabaseSelector, ALT_DB_VAR, DB_VAR, ENV_FILE_VAR, TOKEN_VAR, URL_VAR,
    USERNAME_VAR,
};
pub use destructure::{destructure, is_many2one_column};
pub use error::Error;
pub use executor::{Executor, EXECUTE_KW};
pub use extensions::{ExtensionRegistry, ModelActions};
pub use output::{Output, ReadOutput};
pub use params::Params;
pub use session::{Credentials, Session};
pub use table::{Column, Table};
pub use types::*;

// Re-export core and wire types so users don't need the member crates
pub use odoo_core::{
    ComparisonOperator, Criteria, CriteriaError, Expr, LogicOperator, Record, RecordRef, Term,
    Triplet, Value,
};
pub use odoo_wire::{Endpoint, Transport, TransportError};
#[cfg(feature = "http")]
pub use odoo_wire::HttpTransport;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;
