//! Single-field match query.

use serde::{Deserialize, Serialize};

/// A `(field, value)` pair to match against one index field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQuery {
    /// The index field to match on.
    pub field: String,
    /// The value the field should match.
    pub value: String,
}

impl MatchQuery {
    /// Create a new match query.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}
