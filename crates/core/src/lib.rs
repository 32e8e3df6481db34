//! Core types for the Odoo API client
//!
//! This crate defines the data model shared by the wire layer and the
//! executor:
//! - [`Value`]: the serializable value exchanged with the remote side
//! - [`Criteria`]: flat prefix-notation search filters, plus the [`Expr`]
//!   tree they decode into
//! - [`Record`] / [`RecordRef`]: rows from read operations and their
//!   many-to-one references
//! - [`CriteriaError`]: criteria validation failures

#![warn(clippy::all)]

pub mod criteria;
pub mod error;
pub mod record;
pub mod value;

pub use criteria::{ComparisonOperator, Criteria, Expr, LogicOperator, Term, Triplet};
pub use error::CriteriaError;
pub use record::{Record, RecordRef};
pub use value::{Value, DATETIME_FORMAT};
