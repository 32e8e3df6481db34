//! Supporting types for commands and client options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use odoo_core::Value;

/// Metadata model queried by `model_fields`.
pub const FIELDS_MODEL: &str = "ir.model.fields";

/// Field attributes returned by `model_fields` when none are requested.
pub const FIELD_ATTRIBUTES: [&str; 6] = [
    "name",
    "field_description",
    "model_id",
    "ttype",
    "state",
    "relation",
];

// =============================================================================
// Access rights
// =============================================================================

/// Operation checked by `check_access_rights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRight {
    /// May create records
    Create,
    /// May read records
    Read,
    /// May modify records
    Write,
    /// May delete records
    Unlink,
}

impl AccessRight {
    /// Wire name of the right.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRight::Create => "create",
            AccessRight::Read => "read",
            AccessRight::Write => "write",
            AccessRight::Unlink => "unlink",
        }
    }
}

impl fmt::Display for AccessRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRight {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AccessRight::Create),
            "read" => Ok(AccessRight::Read),
            "write" => Ok(AccessRight::Write),
            "unlink" => Ok(AccessRight::Unlink),
            other => Err(ParseOptionError::new("access right", other)),
        }
    }
}

impl From<AccessRight> for Value {
    fn from(right: AccessRight) -> Self {
        Value::String(right.as_str().to_string())
    }
}

// =============================================================================
// Methods
// =============================================================================

/// Remote method vocabulary.
///
/// The standard ORM methods are named; anything else is a model action
/// (`action_confirm`, `button_cancel`, ...). The remote side is the only
/// judge of whether a method exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// `check_access_rights`
    CheckAccessRights,
    /// `search`
    Search,
    /// `read`
    Read,
    /// `search_read`
    SearchRead,
    /// `search_count`
    SearchCount,
    /// `create`
    Create,
    /// `write`
    Write,
    /// `unlink`
    Unlink,
    /// Any other public method of the model
    Action(String),
}

impl Method {
    /// Wire name of the method.
    pub fn as_str(&self) -> &str {
        match self {
            Method::CheckAccessRights => "check_access_rights",
            Method::Search => "search",
            Method::Read => "read",
            Method::SearchRead => "search_read",
            Method::SearchCount => "search_count",
            Method::Create => "create",
            Method::Write => "write",
            Method::Unlink => "unlink",
            Method::Action(name) => name,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        match name {
            "check_access_rights" => Method::CheckAccessRights,
            "search" => Method::Search,
            "read" => Method::Read,
            "search_read" => Method::SearchRead,
            "search_count" => Method::SearchCount,
            "create" => Method::Create,
            "write" => Method::Write,
            "unlink" => Method::Unlink,
            other => Method::Action(other.to_string()),
        }
    }
}

impl From<String> for Method {
    fn from(name: String) -> Self {
        Method::from(name.as_str())
    }
}

// =============================================================================
// Output shaping
// =============================================================================

/// Shape of read-family results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// List of row records
    Dict,
    /// Column-oriented [`Table`](crate::Table)
    #[default]
    #[serde(alias = "dataframe")]
    Table,
}

impl OutputMode {
    /// Effective mode: the per-call choice, else the client default.
    pub fn resolve(explicit: Option<OutputMode>, default: OutputMode) -> OutputMode {
        explicit.unwrap_or(default)
    }
}

impl FromStr for OutputMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dict" => Ok(OutputMode::Dict),
            "dataframe" | "table" => Ok(OutputMode::Table),
            other => Err(ParseOptionError::new("output mode", other)),
        }
    }
}

/// How many-to-one columns are reshaped in tabular output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Many2OneMode {
    /// `<base>_id` holds the id, `<base>_name` holds the label
    #[default]
    Pair,
    /// `<base>_id` holds the id, no label column
    IdOnly,
    /// `<base>_name` holds the label, the id column is dropped
    NameOnly,
    /// Columns are left untouched
    Raw,
}

impl Many2OneMode {
    /// Whether the `<base>_id` column is kept and rewritten.
    pub fn keeps_id(&self) -> bool {
        matches!(self, Many2OneMode::Pair | Many2OneMode::IdOnly)
    }

    /// Whether a `<base>_name` column is derived.
    pub fn keeps_name(&self) -> bool {
        matches!(self, Many2OneMode::Pair | Many2OneMode::NameOnly)
    }

    /// Mode selected by the legacy `separate_many2one` / `many2one_ids_only`
    /// flags.
    pub fn from_legacy_flags(separate: bool, ids_only: bool) -> Many2OneMode {
        match (separate, ids_only) {
            (_, true) => Many2OneMode::IdOnly,
            (true, false) => Many2OneMode::Pair,
            (false, false) => Many2OneMode::Raw,
        }
    }
}

impl FromStr for Many2OneMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pair" => Ok(Many2OneMode::Pair),
            "id_only" => Ok(Many2OneMode::IdOnly),
            "name_only" => Ok(Many2OneMode::NameOnly),
            "raw" => Ok(Many2OneMode::Raw),
            other => Err(ParseOptionError::new("many2one mode", other)),
        }
    }
}

/// An option string that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        ParseOptionError {
            kind,
            value: value.to_string(),
        }
    }
}
