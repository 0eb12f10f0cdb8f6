//! Tabular result format handed back to the host.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, RunnerCommonError};

/// A single output column as declared by the query author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub datatype: String,
}

/// Columns plus one record per source row.
///
/// Record keys follow the column order (`serde_json` is built with
/// `preserve_order`, so serialization keeps insertion order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Records {
    pub columns: Vec<Column>,
    pub rows: Vec<Map<String, Value>>,
}

impl Records {
    /// Zip positional rows with the column list into named records.
    ///
    /// Every row must provide a value for every column; a short row is an
    /// error, never a partial record. Values past the last column are
    /// dropped.
    pub fn from_raw_rows(columns: Vec<Column>, raw: Vec<Vec<Value>>) -> Result<Records> {
        let mut rows = Vec::with_capacity(raw.len());
        for (idx, values) in raw.into_iter().enumerate() {
            if values.len() < columns.len() {
                return Err(RunnerCommonError::RowTooShort {
                    row: idx,
                    got: values.len(),
                    expected: columns.len(),
                });
            }
            let mut record = Map::with_capacity(columns.len());
            for (column, value) in columns.iter().zip(values) {
                record.insert(column.name.clone(), value);
            }
            rows.push(record);
        }
        Ok(Records { columns, rows })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
