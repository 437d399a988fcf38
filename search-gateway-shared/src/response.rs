//! Result of a match query.

use serde::{Deserialize, Serialize};

use crate::Record;

/// Outcome of a successful match query.
///
/// Query failures are not represented here; they are reported as errors by
/// the repository layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    /// At least one record matched.
    Found {
        /// Total number of matching records reported by the engine.
        total: u64,
        /// Matching records in engine order, bounded by the configured hit limit.
        records: Vec<Record>,
    },
    /// No record matched.
    Empty,
}

impl MatchResult {
    /// Build a result from engine hits, collapsing an empty hit list to `Empty`.
    pub fn from_hits(total: u64, records: Vec<Record>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Found {
                total: total.max(records.len() as u64),
                records,
            }
        }
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The matching records (empty slice when nothing matched).
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Found { records, .. } => records,
            Self::Empty => &[],
        }
    }

    /// The best-ranked matching record.
    pub fn first(&self) -> Option<&Record> {
        self.records().first()
    }
}
