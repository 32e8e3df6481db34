//! Many-to-one column destructuring for tabular output.
//!
//! A many-to-one field arrives as `[id, label]`, or as `false` when nothing
//! is linked. In tabular output such a column can be split into an id
//! column and a label column:
//!
//! | Mode | `<base>_id` | `<base>_name` |
//! |------|-------------|---------------|
//! | `Pair` | id | label |
//! | `IdOnly` | id | - |
//! | `NameOnly` | - | label |
//! | `Raw` | unchanged | - |
//!
//! Reference columns are recognised by name alone: any column ending in
//! `_id` other than `id` itself. No field metadata is fetched, so a plain
//! integer column such as `external_id` is treated as a reference too; its
//! values are not pairs and pass through unchanged.
//!
//! Cells that are not `[id, label]` pairs (the `false` sentinel, or any
//! other shape) are copied verbatim into every derived column. Empty cells
//! stay empty. A derived `<base>_name` column replaces an existing column
//! of the same name.

use std::collections::HashSet;

use odoo_core::{RecordRef, Value};

use crate::table::{Column, Table};
use crate::Many2OneMode;

const REFERENCE_SUFFIX: &str = "_id";
const LABEL_SUFFIX: &str = "_name";

/// Whether a column name follows the many-to-one naming convention.
pub fn is_many2one_column(name: &str) -> bool {
    reference_base(name).is_some()
}

fn reference_base(name: &str) -> Option<&str> {
    name.strip_suffix(REFERENCE_SUFFIX)
        .filter(|base| !base.is_empty())
}

fn label_column(base: &str) -> String {
    format!("{}{}", base, LABEL_SUFFIX)
}

fn project(cells: &[Option<Value>], part: fn(&RecordRef) -> &Value) -> Vec<Option<Value>> {
    cells
        .iter()
        .map(|cell| {
            cell.as_ref()
                .map(|value| part(&RecordRef::from_value(value)).clone())
        })
        .collect()
}

/// Reshape every many-to-one column of `table` according to `mode`.
///
/// Non-reference columns keep their position. A reference column is
/// replaced, in place, by its id column and/or its label column.
pub fn destructure(table: Table, mode: Many2OneMode) -> Table {
    if mode == Many2OneMode::Raw {
        return table;
    }

    let (columns, rows) = table.into_columns();

    let derived_labels: HashSet<String> = if mode.keeps_name() {
        columns
            .iter()
            .filter_map(|c| reference_base(&c.name))
            .map(label_column)
            .collect()
    } else {
        HashSet::new()
    };

    let mut out = Vec::with_capacity(columns.len() * 2);
    for column in columns {
        let base = match reference_base(&column.name) {
            Some(base) => base.to_string(),
            None => {
                if !derived_labels.contains(&column.name) {
                    out.push(column);
                }
                continue;
            }
        };

        let names = mode
            .keeps_name()
            .then(|| project(&column.cells, RecordRef::name));
        if mode.keeps_id() {
            let ids = project(&column.cells, RecordRef::id);
            out.push(Column::new(column.name, ids));
        }
        if let Some(names) = names {
            out.push(Column::new(label_column(&base), names));
        }
    }

    Table::from_columns(out, rows)
}
