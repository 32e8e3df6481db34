//! Output enum for command results.
//!
//! Every command produces exactly one output variant (see the table on
//! [`Command`](crate::Command)). [`ReadOutput`] is the shaped result of the
//! read-family operations after output-mode resolution.

use serde::{Deserialize, Serialize};

use odoo_core::{Record, Value};

use crate::destructure::destructure;
use crate::table::Table;
use crate::types::{Many2OneMode, OutputMode};

/// Successful command results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// `check_access_rights`, `write`, `unlink`
    Bool(bool),
    /// `create` with a single record
    Id(i64),
    /// `search`, `create` with several records
    Ids(Vec<i64>),
    /// `search_count`
    Count(u64),
    /// `read`, `search_read`
    Records(Vec<Record>),
    /// Model actions and anything else passed through as received
    Value(Value),
}

/// Read results in the requested shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReadOutput {
    /// List of row records
    Records(Vec<Record>),
    /// Column-oriented table
    Table(Table),
}

impl ReadOutput {
    /// Shape `records` according to `mode`.
    pub fn shape(records: Vec<Record>, mode: OutputMode) -> ReadOutput {
        match mode {
            OutputMode::Dict => ReadOutput::Records(records),
            OutputMode::Table => ReadOutput::Table(Table::from_records(&records)),
        }
    }

    /// Row records, converting from a table if needed.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            ReadOutput::Records(records) => records,
            ReadOutput::Table(table) => table.to_records(),
        }
    }

    /// Table, converting from records if needed.
    pub fn into_table(self) -> Table {
        match self {
            ReadOutput::Records(records) => Table::from_records(&records),
            ReadOutput::Table(table) => table,
        }
    }

    /// Borrow the records, if this is the record form.
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            ReadOutput::Records(records) => Some(records),
            ReadOutput::Table(_) => None,
        }
    }

    /// Borrow the table, if this is the tabular form.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ReadOutput::Table(table) => Some(table),
            ReadOutput::Records(_) => None,
        }
    }

    /// Reshape many-to-one columns. Record output is returned unchanged.
    pub fn destructure(self, mode: Many2OneMode) -> ReadOutput {
        match self {
            ReadOutput::Table(table) => ReadOutput::Table(destructure(table, mode)),
            records => records,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ReadOutput::Records(records) => records.len(),
            ReadOutput::Table(table) => table.num_rows(),
        }
    }

    /// True when no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ReadOutput> for Vec<Record> {
    fn from(output: ReadOutput) -> Self {
        output.into_records()
    }
}

impl From<ReadOutput> for Table {
    fn from(output: ReadOutput) -> Self {
        output.into_table()
    }
}
