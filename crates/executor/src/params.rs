//! Argument builder for `execute_kw` calls.
//!
//! A [`Params`] collects the optional ingredients of one call and splits
//! them into positional `args` and keyword `kwargs`:
//!
//! | Ingredient | Slot | Canonical position |
//! |------------|------|--------------------|
//! | `record_ids` | args | 0 |
//! | `criteria` | args | 1 |
//! | `records_data` | args | 2 |
//! | `right_type` | args | 3 |
//! | `fields` | kwargs | |
//! | `offset` | kwargs | |
//! | `limit` | kwargs | |
//! | `raise_exception` | kwargs | |
//! | extra entries | kwargs | |
//!
//! An ingredient is unset when it was never given or was given as
//! [`Value::Null`] (e.g. `None::<i64>`). Unset ingredients are left out;
//! zero, `false` and empty values are sent as is. Extra entries are merged
//! over the named keyword ingredients before unset values are dropped, so
//! an extra entry can both override a named keyword and be elided itself.

use indexmap::IndexMap;

use odoo_core::Value;

/// Per-call argument builder. Never fails.
///
/// # Example
///
/// ```
/// use odoo_executor::Params;
/// use odoo_core::Criteria;
///
/// let params = Params::new()
///     .criteria(Criteria::new())
///     .offset(0)
///     .limit(None::<i64>);
///
/// assert_eq!(params.args().len(), 1);
/// assert!(params.kwargs().contains_key("offset"));
/// assert!(!params.kwargs().contains_key("limit"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    record_ids: Value,
    criteria: Value,
    records_data: Value,
    right_type: Value,
    fields: Value,
    offset: Value,
    limit: Value,
    raise_exception: Value,
    extra: IndexMap<String, Value>,
}

impl Params {
    /// Empty builder: no args, no kwargs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record identifier(s), first positional argument.
    pub fn record_ids(mut self, ids: impl Into<Value>) -> Self {
        self.record_ids = ids.into();
        self
    }

    /// Search criteria, second positional argument.
    pub fn criteria(mut self, criteria: impl Into<Value>) -> Self {
        self.criteria = criteria.into();
        self
    }

    /// Record payload for `create` / `write`, third positional argument.
    pub fn records_data(mut self, data: impl Into<Value>) -> Self {
        self.records_data = data.into();
        self
    }

    /// Access right for `check_access_rights`, fourth positional argument.
    pub fn right_type(mut self, right: impl Into<Value>) -> Self {
        self.right_type = right.into();
        self
    }

    /// Field names to return.
    pub fn fields(mut self, fields: impl Into<Value>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Number of records to skip.
    pub fn offset(mut self, offset: impl Into<Value>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Maximum number of records.
    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Whether the remote side raises instead of answering `false`.
    pub fn raise_exception(mut self, raise: impl Into<Value>) -> Self {
        self.raise_exception = raise.into();
        self
    }

    /// Add one free-form keyword argument.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Add free-form keyword arguments.
    pub fn extend<K, V, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.extra
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Positional arguments in canonical order, unset ones skipped.
    pub fn args(&self) -> Vec<Value> {
        [
            &self.record_ids,
            &self.criteria,
            &self.records_data,
            &self.right_type,
        ]
        .into_iter()
        .filter(|v| !v.is_null())
        .cloned()
        .collect()
    }

    /// Keyword arguments with extras merged, unset ones skipped.
    pub fn kwargs(&self) -> IndexMap<String, Value> {
        let mut kwargs: IndexMap<String, Value> = [
            ("fields", &self.fields),
            ("offset", &self.offset),
            ("limit", &self.limit),
            ("raise_exception", &self.raise_exception),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

        for (key, value) in &self.extra {
            kwargs.insert(key.clone(), value.clone());
        }

        kwargs.retain(|_, v| !v.is_null());
        kwargs
    }

    /// Both halves, ready for dispatch.
    pub fn build(&self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.args(), self.kwargs())
    }
}
