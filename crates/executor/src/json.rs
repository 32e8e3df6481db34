//! JSON export of values, records and tables.
//!
//! | Type | JSON Representation |
//! |------|---------------------|
//! | Bytes | base64 string |
//! | NaN / infinite float | `null` |
//! | Record | object, field order kept |
//! | Table | `{"columns": [...], "rows": [[...], ...]}`, empty cells as `null` |

use serde_json::{json, Map, Value as JsonValue};

use odoo_core::{Record, Value};

use crate::table::Table;

/// Convert a [`Value`] to JSON.
pub fn value_to_json(value: &Value) -> JsonValue {
    JsonValue::from(value.clone())
}

/// Convert JSON to a [`Value`].
///
/// Integers that do not fit in `i64` become floats.
pub fn json_to_value(json: &JsonValue) -> Value {
    Value::from(json.clone())
}

/// Records as a JSON array of objects.
pub fn records_to_json(records: &[Record]) -> JsonValue {
    JsonValue::Array(
        records
            .iter()
            .map(|record| {
                JsonValue::Object(
                    record
                        .iter()
                        .map(|(k, v)| (k.clone(), value_to_json(v)))
                        .collect::<Map<String, JsonValue>>(),
                )
            })
            .collect(),
    )
}

/// Table as `{"columns": [...], "rows": [[...], ...]}`.
pub fn table_to_json(table: &Table) -> JsonValue {
    let rows: Vec<JsonValue> = (0..table.num_rows())
        .map(|row| {
            JsonValue::Array(
                table
                    .columns()
                    .iter()
                    .map(|col| {
                        col.cells
                            .get(row)
                            .and_then(Option::as_ref)
                            .map(value_to_json)
                            .unwrap_or(JsonValue::Null)
                    })
                    .collect(),
            )
        })
        .collect();

    json!({
        "columns": table.column_names(),
        "rows": rows,
    })
}
