//! Record type and protected field names
//!
//! A record is a JSON object. Key order is preserved so a record written to
//! disk reads back field-for-field in the same order.

use serde_json::{Map, Value};

use crate::error::{JsonBaseError, Result};

/// One stored document
pub type Record = Map<String, Value>;

/// Unique record identifier, assigned once on insert
pub const ID_FIELD: &str = "id";

/// Insert timestamp (epoch seconds), assigned once on insert
pub const CREATION_TIME_FIELD: &str = "creationTime";

/// Last update timestamp (epoch seconds), refreshed on every update
pub const UPDATE_TIME_FIELD: &str = "updateTime";

/// Fields user payloads can never overwrite
pub const PRESERVED_FIELDS: [&str; 2] = [ID_FIELD, CREATION_TIME_FIELD];

/// Returns the record's `id` when it is a string
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// True when the record's `id` is exactly `id`
///
/// Ids are compared as strings only; a numeric `id` never matches.
pub fn has_id(record: &Record, id: &str) -> bool {
    record_id(record) == Some(id)
}

/// Convert an arbitrary JSON value into a record
///
/// Fails with `InvalidRecord` unless the value is an object.
pub fn to_record(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(JsonBaseError::InvalidRecord(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
