//! Reading raw FDA documents and projecting loosely-typed fields.
//!
//! Both feeds are shaped `{"results": [ {...}, ... ]}` with heterogeneous
//! records inside; fields may be strings, numbers, booleans, or arrays
//! depending on the record. Projection keeps string values as-is and renders
//! anything else as compact JSON, so downstream tables stay flat.

use std::path::Path;

use serde_json::Value;

use crate::error::{IngestError, Result};

/// Read a raw FDA document and return its `results` records.
pub fn read_results(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document: Value = serde_json::from_str(&text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    match document.get("results") {
        Some(Value::Array(records)) => Ok(records.clone()),
        _ => Err(IngestError::MissingResults {
            path: path.to_path_buf(),
        }),
    }
}

/// Project a field from a record as an optional string.
///
/// Absent fields and JSON nulls become `None`; non-string scalars and
/// arrays are rendered as compact JSON.
pub fn field_string(record: &Value, field: &str) -> Option<String> {
    value_string(record.get(field)?)
}

/// Render a JSON value as an optional string.
pub fn value_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
