//! Wire layer for the Odoo API client
//!
//! - [`codec`]: XML-RPC documents to and from [`odoo_core::Value`]
//! - [`Transport`]: the blocking call seam the executor talks through
//! - [`HttpTransport`]: the default `reqwest`-based transport (feature `http`)

#![warn(clippy::all)]

pub mod codec;
mod error;
#[cfg(feature = "http")]
mod http;
mod transport;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use transport::{Endpoint, Transport};
