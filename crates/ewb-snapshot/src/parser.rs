//! Snapshot parser
//!
//! Decodes the `old_value` / `new_value` strings of a [`ChangeRecord`] with
//! serde_json. Empty values are not errors; anything else must decode.
//!
//! [`ChangeRecord`]: crate::ChangeRecord

use crate::error::SnapshotError;
use crate::model::{FieldSnapshotEntry, FormDataEntry};
use serde_json::Value;

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a collection snapshot
///
/// Empty input and JSON `null` yield an empty list.
///
/// # Errors
/// Returns [`SnapshotError::Malformed`] on invalid JSON or entries without
/// the `{model, pk, fields}` layout, and [`SnapshotError::UnexpectedShape`]
/// when the text decodes to something other than an array.
pub fn parse_entries(raw: Option<&str>) -> Result<Vec<FieldSnapshotEntry>, SnapshotError> {
    let Some(text) = blank(raw) else {
        return Ok(Vec::new());
    };

    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(SnapshotError::UnexpectedShape {
            expected: "array",
            found: shape_name(&other),
        }),
    }
}

/// Parse a scalar snapshot; empty input yields `None`
#[must_use]
pub fn parse_scalar(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Parse DMP form data into flat `name`/`value` records
///
/// # Errors
/// Same as [`parse_entries`]
pub fn parse_form_data(raw: Option<&str>) -> Result<Vec<FormDataEntry>, SnapshotError> {
    Ok(parse_entries(raw)?
        .iter()
        .map(|entry| FormDataEntry {
            name: entry.field_str("name").unwrap_or_default(),
            value: entry.field_str("value").unwrap_or_default(),
        })
        .collect())
}
