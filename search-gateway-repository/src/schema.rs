//! Index schema for the car catalog.
//!
//! Every index provisioned by the gateway gets this fixed mapping. It is
//! declared once at creation time and never altered afterwards.

use serde_json::{json, Map, Value};

/// Date format used by the `Year` field.
pub const YEAR_FORMAT: &str = "yyyy-MM-dd";

/// Primitive types used by the car schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Analyzed full-text field.
    Text,
    /// Exact-match, non-tokenized field.
    Keyword,
    /// 32-bit floating point number.
    Float,
    /// 32-bit integer.
    Integer,
    /// Date with an explicit format.
    Date {
        /// Engine date format pattern.
        format: &'static str,
    },
}

impl FieldType {
    /// The mapping fragment for this type.
    pub fn mapping(&self) -> Value {
        match self {
            FieldType::Text => json!({ "type": "text" }),
            FieldType::Keyword => json!({ "type": "keyword" }),
            FieldType::Float => json!({ "type": "float" }),
            FieldType::Integer => json!({ "type": "integer" }),
            FieldType::Date { format } => json!({ "type": "date", "format": format }),
        }
    }
}

/// Declared fields of the car schema, in declaration order.
pub const CAR_FIELDS: [(&str, FieldType); 9] = [
    ("Name", FieldType::Text),
    ("Miles_per_Gallon", FieldType::Float),
    ("Cylinders", FieldType::Integer),
    ("Displacement", FieldType::Float),
    ("Horsepower", FieldType::Float),
    ("Weight_in_lbs", FieldType::Integer),
    ("Acceleration", FieldType::Float),
    ("Year", FieldType::Date { format: YEAR_FORMAT }),
    ("Origin", FieldType::Keyword),
];

/// Look up the declared type of a field.
pub fn field_type(field: &str) -> Option<FieldType> {
    CAR_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, field_type)| *field_type)
}

/// True when `field` is part of the declared schema.
pub fn is_declared_field(field: &str) -> bool {
    field_type(field).is_some()
}

/// Create-index request body with the car mapping.
pub fn index_mappings() -> Value {
    let properties: Map<String, Value> = CAR_FIELDS
        .iter()
        .map(|(name, field_type)| (name.to_string(), field_type.mapping()))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}
