use serde_json::{Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// RemoteTable – records returned by the datastore, shown as-is
// ---------------------------------------------------------------------------

/// Column holding a record that is not a JSON object.
pub const SCALAR_COLUMN: &str = "value";

/// Opaque rows from the datastore. Columns follow the first record's fields
/// in API order; later rows are not checked against them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteTable {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, JsonValue>>,
}

impl RemoteTable {
    /// Object records keep their fields; any other value is wrapped as a
    /// single-field row under [`SCALAR_COLUMN`].
    pub fn from_records(records: Vec<JsonValue>) -> Self {
        let rows: Vec<Map<String, JsonValue>> = records
            .into_iter()
            .map(|record| match record {
                JsonValue::Object(fields) => fields,
                other => Map::from_iter([(SCALAR_COLUMN.to_string(), other)]),
            })
            .collect();
        let columns = rows
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();
        RemoteTable { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display text of a cell; absent fields and nulls are blank.
    pub fn cell(&self, row: usize, column: &str) -> String {
        match self.rows.get(row).and_then(|r| r.get(column)) {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
