//! Rows, result shapes and typed row mapping.

use crate::error::{TableError, TableResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One result row: column name → value, in select-list order.
pub type Row = serde_json::Map<String, Value>;

/// How query results are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultShape {
    /// Rows as ordered column → value maps.
    #[default]
    Objects,
    /// Rows keyed by the value of their first column. Later rows with a
    /// duplicate key are discarded.
    Keyed,
    /// Rows as positional value lists.
    Arrays,
}

/// Query results in the requested [`ResultShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Objects(Vec<Row>),
    Keyed(serde_json::Map<String, Value>),
    Arrays(Vec<Vec<Value>>),
}

impl ResultShape {
    /// Reshape rows returned by the driver.
    pub fn apply(self, rows: Vec<Row>) -> QueryOutput {
        match self {
            ResultShape::Objects => QueryOutput::Objects(rows),
            ResultShape::Keyed => {
                let mut keyed = serde_json::Map::new();
                for row in rows {
                    let Some(first) = row.values().next() else {
                        continue;
                    };
                    let key = key_string(first);
                    if !keyed.contains_key(&key) {
                        keyed.insert(key, Value::Object(row));
                    }
                }
                QueryOutput::Keyed(keyed)
            }
            ResultShape::Arrays => QueryOutput::Arrays(
                rows.into_iter()
                    .map(|row| row.into_iter().map(|(_, v)| v).collect())
                    .collect(),
            ),
        }
    }
}

impl QueryOutput {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Objects(rows) => rows.len(),
            QueryOutput::Keyed(rows) => rows.len(),
            QueryOutput::Arrays(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows as objects, if this output has that shape.
    pub fn into_objects(self) -> Option<Vec<Row>> {
        match self {
            QueryOutput::Objects(rows) => Some(rows),
            _ => None,
        }
    }
}

fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Map a [`Row`] into a Rust type.
///
/// Every `serde::Deserialize` type implements this via serde_json.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> TableResult<Self>;
}

impl<T: DeserializeOwned> FromRow for T {
    fn from_row(row: &Row) -> TableResult<Self> {
        serde_json::from_value(Value::Object(row.clone()))
            .map_err(|e| TableError::Decode(e.to_string()))
    }
}

/// Extension methods for [`Row`].
pub trait RowExt {
    /// Value of `column` decoded as `T`.
    fn get_as<T: DeserializeOwned>(&self, column: &str) -> TableResult<T>;
}

impl RowExt for Row {
    fn get_as<T: DeserializeOwned>(&self, column: &str) -> TableResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| TableError::Decode(format!("column '{column}' not in row")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| TableError::Decode(format!("column '{column}': {e}")))
    }
}
