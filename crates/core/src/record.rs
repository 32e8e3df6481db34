//! Records and many-to-one references as returned by read operations.

use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One row returned by `read` / `search_read`.
///
/// Field order is the order the remote side sent. The `id` key is always
/// present on rows read from the remote side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    /// Empty record.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Record identifier, if the `id` key holds an integer.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_int)
    }

    /// Field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Builder-style [`Record::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Decode a field as a many-to-one reference.
    pub fn reference(&self, field: &str) -> Option<RecordRef> {
        self.0.get(field).map(RecordRef::from_value)
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }

    /// Decode a record from a remote struct value.
    pub fn from_value(value: Value) -> Option<Record> {
        match value {
            Value::Object(map) => Some(Record(map)),
            _ => None,
        }
    }
}

impl Deref for Record {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(map: IndexMap<String, Value>) -> Self {
        Record(map)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Object(r.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Decoded many-to-one field value.
///
/// The remote side sends `[id, display_name]` for a linked record and the
/// falsy sentinel `false` when nothing is linked. Elements of a pair are not
/// type-checked.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRef {
    /// A `[id, label]` pair (elements kept verbatim).
    Linked {
        /// First element, normally the integer id
        id: Value,
        /// Second element, normally the display label
        name: Value,
    },
    /// Anything that is not a pair, usually `false`.
    Unlinked(Value),
}

impl RecordRef {
    /// Classify a raw field value.
    pub fn from_value(value: &Value) -> RecordRef {
        match value {
            Value::Array(items) if items.len() == 2 => RecordRef::Linked {
                id: items[0].clone(),
                name: items[1].clone(),
            },
            other => RecordRef::Unlinked(other.clone()),
        }
    }

    /// Identifier component, or the raw falsy value.
    pub fn id(&self) -> &Value {
        match self {
            RecordRef::Linked { id, .. } => id,
            RecordRef::Unlinked(raw) => raw,
        }
    }

    /// Label component, or the raw falsy value.
    pub fn name(&self) -> &Value {
        match self {
            RecordRef::Linked { name, .. } => name,
            RecordRef::Unlinked(raw) => raw,
        }
    }

    /// True for a `[id, label]` pair.
    pub fn is_linked(&self) -> bool {
        matches!(self, RecordRef::Linked { .. })
    }
}
