//! Data retrieval helpers built on `read` and `search_read`.

use odoo_core::{ComparisonOperator, Criteria, LogicOperator, Triplet, Value};

use super::Client;
use crate::destructure::destructure;
use crate::types::{FIELDS_MODEL, FIELD_ATTRIBUTES};
use crate::{Error, Many2OneMode, OutputMode, ReadOutput, Result, Table};

impl Client {
    /// Field metadata of `model` from `ir.model.fields`.
    ///
    /// `attributes` selects the metadata columns (default
    /// [`FIELD_ATTRIBUTES`]); `fields` restricts the result to the named
    /// fields.
    ///
    /// ```ignore
    /// let fields = client.model_fields("sale.order", None, Some(&["id", "name", "state"]), None)?;
    /// ```
    pub fn model_fields(
        &self,
        model: &str,
        attributes: Option<&[&str]>,
        fields: Option<&[&str]>,
        output: Option<OutputMode>,
    ) -> Result<ReadOutput> {
        let attributes = attributes.unwrap_or(&FIELD_ATTRIBUTES);
        self.search_read(
            FIELDS_MODEL,
            Some(model_fields_criteria(model, fields)),
            Some(attributes),
            None,
            None,
            output,
        )
    }

    /// Search and read into a table with many-to-one columns reshaped.
    ///
    /// An empty result is a table with no rows whose columns are `id`
    /// followed by the requested fields.
    ///
    /// ```ignore
    /// let table = client.dataset(
    ///     "sale.order",
    ///     None,
    ///     Some(&["name", "partner_id", "user_id"]),
    ///     None,
    ///     None,
    ///     Many2OneMode::Pair,
    /// )?;
    /// // columns: id, name, partner_id, partner_name, user_id, user_name
    /// ```
    pub fn dataset(
        &self,
        model: &str,
        criteria: Option<Criteria>,
        fields: Option<&[&str]>,
        offset: Option<i64>,
        limit: Option<i64>,
        many2one: Many2OneMode,
    ) -> Result<Table> {
        let records = self
            .search_read(model, criteria, fields, offset, limit, Some(OutputMode::Dict))?
            .into_records();

        if records.is_empty() {
            let columns = std::iter::once("id").chain(fields.unwrap_or(&[]).iter().copied());
            return Ok(Table::with_columns(columns));
        }

        Ok(destructure(Table::from_records(&records), many2one))
    }

    /// Value of one field of one record.
    ///
    /// Returns `Ok(None)` when the record does not exist. A record whose
    /// field is empty yields `Some(Value::Bool(false))`, as sent by the
    /// remote side.
    pub fn get_value(&self, model: &str, id: i64, field: &str) -> Result<Option<Value>> {
        Ok(self
            .get_values(model, id, &[field])?
            .and_then(|values| values.into_iter().next()))
    }

    /// Values of several fields of one record, in the order requested.
    ///
    /// Returns `Ok(None)` when the record does not exist.
    pub fn get_values(&self, model: &str, id: i64, fields: &[&str]) -> Result<Option<Vec<Value>>> {
        let records = self
            .read(model, vec![id], Some(fields), Some(OutputMode::Dict))?
            .into_records();

        let record = match records.into_iter().next() {
            Some(record) => record,
            None => return Ok(None),
        };

        fields
            .iter()
            .map(|field| {
                record
                    .get(field)
                    .cloned()
                    .ok_or_else(|| Error::UnexpectedResponse {
                        method: "read".to_string(),
                        expected: format!("field '{}'", field),
                        actual: "record without it".to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// `[('model_id', '=', model)]`, narrowed with
/// `['&', ..., ('name', 'in', fields)]` when fields are given.
pub(crate) fn model_fields_criteria(model: &str, fields: Option<&[&str]>) -> Criteria {
    let by_model = Triplet::new("model_id", ComparisonOperator::Eq, model);
    match fields {
        Some(fields) if !fields.is_empty() => Criteria::new()
            .push(LogicOperator::And)
            .push(by_model)
            .push(Triplet::new(
                "name",
                ComparisonOperator::In,
                fields.to_vec(),
            )),
        _ => Criteria::new().push(by_model),
    }
}
