//! Command enum defining every client operation.
//!
//! Each variant is self-contained: it carries the model and all parameters
//! needed to build one `execute_kw` call. Commands are plain data and can
//! be serialized.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use odoo_core::{Criteria, Value};

use crate::types::{AccessRight, Method};

/// A single item or a list of items.
///
/// `create` sends a single record as one mapping and several records as a
/// list of mappings; the remote side answers with one id or a list of ids
/// accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListOrItem<T> {
    /// Several items
    List(Vec<T>),
    /// One item
    Item(T),
}

impl<T> ListOrItem<T> {
    /// Normalise to a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListOrItem::List(items) => items,
            ListOrItem::Item(item) => vec![item],
        }
    }
}

impl<T> From<Vec<T>> for ListOrItem<T> {
    fn from(items: Vec<T>) -> Self {
        ListOrItem::List(items)
    }
}

impl From<IndexMap<String, Value>> for ListOrItem<IndexMap<String, Value>> {
    fn from(item: IndexMap<String, Value>) -> Self {
        ListOrItem::Item(item)
    }
}

impl From<i64> for ListOrItem<i64> {
    fn from(item: i64) -> Self {
        ListOrItem::Item(item)
    }
}

/// Field values keyed by field name.
pub type RecordData = IndexMap<String, Value>;

/// A client operation.
///
/// | Command | Method | Output |
/// |---------|--------|--------|
/// | `CheckAccessRights` | `check_access_rights` | `Bool` |
/// | `Create` | `create` | `Id` / `Ids` |
/// | `Search` | `search` | `Ids` |
/// | `Read` | `read` | `Records` |
/// | `SearchRead` | `search_read` | `Records` |
/// | `SearchCount` | `search_count` | `Count` |
/// | `Write` | `write` | `Bool` |
/// | `Unlink` | `unlink` | `Bool` |
/// | `Execute` | any action | `Value` |
/// | `ServerVersion` | `version` (common endpoint) | `Value` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Whether the user holds `right` on `model`.
    CheckAccessRights {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Right to check
        right: AccessRight,
        /// Fault instead of answering `false`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raise_exception: Option<bool>,
    },

    /// Create one or several records.
    Create {
        /// Model name, e.g. `res.partner`
        model: String,
        /// One mapping or a list of mappings
        records: ListOrItem<RecordData>,
    },

    /// Ids of records matching `criteria`.
    Search {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Prefix-notation filter; empty matches all
        criteria: Criteria,
        /// Records to skip
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<i64>,
        /// Maximum records returned
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
    },

    /// Read records by id.
    Read {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Target record ids
        ids: Vec<i64>,
        /// Fields to return; all when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
    },

    /// Search and read in one round trip.
    SearchRead {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Prefix-notation filter; empty matches all
        criteria: Criteria,
        /// Fields to return; all when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
        /// Records to skip
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<i64>,
        /// Maximum records returned
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
    },

    /// Number of records matching `criteria`.
    SearchCount {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Prefix-notation filter; empty matches all
        criteria: Criteria,
    },

    /// Set the same values on every record in `ids`.
    Write {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Target record ids
        ids: Vec<i64>,
        /// Values to set
        data: RecordData,
    },

    /// Delete records.
    Unlink {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Target record ids
        ids: Vec<i64>,
    },

    /// Run a model action on records.
    Execute {
        /// Model name, e.g. `res.partner`
        model: String,
        /// Public method of the model
        method: String,
        /// Target record ids
        ids: Vec<i64>,
        /// Keyword arguments passed through
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        kwargs: IndexMap<String, Value>,
    },

    /// Server version information.
    ServerVersion,
}

impl Command {
    /// Remote method invoked by this command.
    pub fn method(&self) -> Method {
        match self {
            Command::CheckAccessRights { .. } => Method::CheckAccessRights,
            Command::Create { .. } => Method::Create,
            Command::Search { .. } => Method::Search,
            Command::Read { .. } => Method::Read,
            Command::SearchRead { .. } => Method::SearchRead,
            Command::SearchCount { .. } => Method::SearchCount,
            Command::Write { .. } => Method::Write,
            Command::Unlink { .. } => Method::Unlink,
            Command::Execute { method, .. } => Method::from(method.as_str()),
            Command::ServerVersion => Method::Action("version".to_string()),
        }
    }

    /// Target model, if the command addresses one.
    pub fn model(&self) -> Option<&str> {
        match self {
            Command::CheckAccessRights { model, .. }
            | Command::Create { model, .. }
            | Command::Search { model, .. }
            | Command::Read { model, .. }
            | Command::SearchRead { model, .. }
            | Command::SearchCount { model, .. }
            | Command::Write { model, .. }
            | Command::Unlink { model, .. }
            | Command::Execute { model, .. } => Some(model),
            Command::ServerVersion => None,
        }
    }

    /// Criteria carried by the command, if any.
    pub fn criteria(&self) -> Option<&Criteria> {
        match self {
            Command::Search { criteria, .. }
            | Command::SearchRead { criteria, .. }
            | Command::SearchCount { criteria, .. } => Some(criteria),
            _ => None,
        }
    }
}
