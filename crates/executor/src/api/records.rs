//! Record operations: access checks, CRUD and model actions.

use indexmap::IndexMap;

use odoo_core::{Criteria, Value};

use super::{field_list, unexpected_output, Client};
use crate::command::{ListOrItem, RecordData};
use crate::{AccessRight, Command, Output, OutputMode, ReadOutput, Result};

impl Client {
    // =========================================================================
    // Access rights
    // =========================================================================

    /// Whether the current user holds `right` on `model`.
    ///
    /// With `raise_exception` set to `Some(true)` the remote side raises an
    /// access error instead of answering `false`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let can_write = client.check_access_rights("res.partner", AccessRight::Write, None)?;
    /// ```
    pub fn check_access_rights(
        &self,
        model: &str,
        right: AccessRight,
        raise_exception: Option<bool>,
    ) -> Result<bool> {
        match self.executor.execute(Command::CheckAccessRights {
            model: model.to_string(),
            right,
            raise_exception,
        })? {
            Output::Bool(allowed) => Ok(allowed),
            other => Err(unexpected_output("check_access_rights", "Bool", &other)),
        }
    }

    // =========================================================================
    // Create / Write / Unlink
    // =========================================================================

    /// Create one record and return its id.
    ///
    /// Keys are technical field names of `model`.
    ///
    /// ```ignore
    /// let mut data = IndexMap::new();
    /// data.insert("name".to_string(), Value::from("Acme"));
    /// let partner_id = client.create("res.partner", data)?;
    /// ```
    pub fn create(&self, model: &str, record: RecordData) -> Result<i64> {
        match self.executor.execute(Command::Create {
            model: model.to_string(),
            records: ListOrItem::Item(record),
        })? {
            Output::Id(id) => Ok(id),
            other => Err(unexpected_output("create", "Id", &other)),
        }
    }

    /// Create several records in one call and return their ids in order.
    pub fn create_many(&self, model: &str, records: Vec<RecordData>) -> Result<Vec<i64>> {
        match self.executor.execute(Command::Create {
            model: model.to_string(),
            records: ListOrItem::List(records),
        })? {
            Output::Ids(ids) => Ok(ids),
            other => Err(unexpected_output("create", "Ids", &other)),
        }
    }

    /// Set the same values on one or several records.
    ///
    /// ```ignore
    /// client.write("sale.order", vec![52, 87, 129], data)?;
    /// ```
    pub fn write(
        &self,
        model: &str,
        ids: impl Into<ListOrItem<i64>>,
        data: RecordData,
    ) -> Result<bool> {
        match self.executor.execute(Command::Write {
            model: model.to_string(),
            ids: ids.into().into_vec(),
            data,
        })? {
            Output::Bool(done) => Ok(done),
            other => Err(unexpected_output("write", "Bool", &other)),
        }
    }

    /// Delete one or several records.
    ///
    /// Records referenced elsewhere (posted invoices, ...) may be refused by
    /// the remote side.
    pub fn unlink(&self, model: &str, ids: impl Into<ListOrItem<i64>>) -> Result<bool> {
        match self.executor.execute(Command::Unlink {
            model: model.to_string(),
            ids: ids.into().into_vec(),
        })? {
            Output::Bool(done) => Ok(done),
            other => Err(unexpected_output("unlink", "Bool", &other)),
        }
    }

    // =========================================================================
    // Search / Read
    // =========================================================================

    /// Ids of records matching `criteria` (every record when `None`).
    pub fn search(
        &self,
        model: &str,
        criteria: Option<Criteria>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<i64>> {
        match self.executor.execute(Command::Search {
            model: model.to_string(),
            criteria: criteria.unwrap_or_default(),
            offset,
            limit,
        })? {
            Output::Ids(ids) => Ok(ids),
            other => Err(unexpected_output("search", "Ids", &other)),
        }
    }

    /// Number of records matching `criteria` (every record when `None`).
    pub fn search_count(&self, model: &str, criteria: Option<Criteria>) -> Result<u64> {
        match self.executor.execute(Command::SearchCount {
            model: model.to_string(),
            criteria: criteria.unwrap_or_default(),
        })? {
            Output::Count(n) => Ok(n),
            other => Err(unexpected_output("search_count", "Count", &other)),
        }
    }

    /// Read records by id. All fields are returned when `fields` is `None`.
    pub fn read(
        &self,
        model: &str,
        ids: impl Into<ListOrItem<i64>>,
        fields: Option<&[&str]>,
        output: Option<OutputMode>,
    ) -> Result<ReadOutput> {
        match self.executor.execute(Command::Read {
            model: model.to_string(),
            ids: ids.into().into_vec(),
            fields: field_list(fields),
        })? {
            Output::Records(records) => Ok(self.shape(records, output)),
            other => Err(unexpected_output("read", "Records", &other)),
        }
    }

    /// Search and read in one call.
    ///
    /// Pagination is applied by the remote side; `Some(0)` is sent as is.
    pub fn search_read(
        &self,
        model: &str,
        criteria: Option<Criteria>,
        fields: Option<&[&str]>,
        offset: Option<i64>,
        limit: Option<i64>,
        output: Option<OutputMode>,
    ) -> Result<ReadOutput> {
        match self.executor.execute(Command::SearchRead {
            model: model.to_string(),
            criteria: criteria.unwrap_or_default(),
            fields: field_list(fields),
            offset,
            limit,
        })? {
            Output::Records(records) => Ok(self.shape(records, output)),
            other => Err(unexpected_output("search_read", "Records", &other)),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Run a model method on records, like pressing a button in the UI.
    ///
    /// Methods that answer with a window description (wizards) need
    /// interactive input and fail with [`Error::NotSupported`](crate::Error::NotSupported).
    ///
    /// ```ignore
    /// client.execute("sale.order", "action_confirm", 15, None)?;
    /// ```
    pub fn execute(
        &self,
        model: &str,
        method: &str,
        ids: impl Into<ListOrItem<i64>>,
        kwargs: Option<IndexMap<String, Value>>,
    ) -> Result<Value> {
        match self.executor.execute(Command::Execute {
            model: model.to_string(),
            method: method.to_string(),
            ids: ids.into().into_vec(),
            kwargs: kwargs.unwrap_or_default(),
        })? {
            Output::Value(value) => Ok(value),
            other => Err(unexpected_output(method, "Value", &other)),
        }
    }
}
