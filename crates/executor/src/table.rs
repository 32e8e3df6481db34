//! Column-oriented view of read results.
//!
//! A [`Table`] is built from a list of records: its columns are the union
//! of the record keys in first-seen order, and a record without a given
//! key has an empty cell (`None`) in that column. Empty cells are
//! distinct from a `Null` value, so converting back to records yields the
//! original rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use odoo_core::{Record, Value};

/// One named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column (field) name
    pub name: String,
    /// One cell per row; `None` marks a key missing from that row
    pub cells: Vec<Option<Value>>,
}

impl Column {
    /// Column with the given cells.
    pub fn new(name: impl Into<String>, cells: Vec<Option<Value>>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }
}

/// Tabular read output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with named columns and no rows.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: names
                .into_iter()
                .map(|name| Column::new(name, Vec::new()))
                .collect(),
            rows: 0,
        }
    }

    /// Build from row records.
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: IndexMap<&str, Vec<Option<Value>>> = IndexMap::new();
        for record in records {
            for key in record.keys() {
                columns.entry(key.as_str()).or_default();
            }
        }
        for record in records {
            for (name, cells) in columns.iter_mut() {
                cells.push(record.get(name).cloned());
            }
        }
        Table {
            columns: columns
                .into_iter()
                .map(|(name, cells)| Column::new(name, cells))
                .collect(),
            rows: records.len(),
        }
    }

    /// Convert back to row records; empty cells are skipped.
    pub fn to_records(&self) -> Vec<Record> {
        (0..self.rows).filter_map(|row| self.row(row)).collect()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at `(row, column)`; `None` when out of range or empty.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)
            .and_then(|c| c.cells.get(row))
            .and_then(Option::as_ref)
    }

    /// Row `row` as a record.
    pub fn row(&self, row: usize) -> Option<Record> {
        if row >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .filter_map(|col| {
                    col.cells
                        .get(row)
                        .cloned()
                        .flatten()
                        .map(|value| (col.name.clone(), value))
                })
                .collect(),
        )
    }

    pub(crate) fn into_columns(self) -> (Vec<Column>, usize) {
        (self.columns, self.rows)
    }

    pub(crate) fn from_columns(columns: Vec<Column>, rows: usize) -> Self {
        Table { columns, rows }
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Table::from_records(&records)
    }
}
