//! Record type for documents uploaded to the search index.

use serde_json::{Map, Value};

/// An untyped record: field name to JSON value.
///
/// Records have no identity of their own beyond their position in the
/// uploaded array. Keys are expected to line up with the declared index
/// schema but this is not enforced.
pub type Record = Map<String, Value>;

/// Read a string field from a record, if present and a string.
pub fn field_as_str<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}
