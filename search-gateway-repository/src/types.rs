//! Request and response types for search engine operations.

use std::fmt;

use search_gateway_shared::Record;

/// Credentials for one connection to a managed search cluster.
///
/// Supplied per request and never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Elastic Cloud id (`label:base64(host$es_uuid$kibana_uuid)`).
    pub cloud_id: String,
    /// API key, either `base64(id:key)` or the raw `id:key` pair.
    pub api_key: String,
}

impl Credentials {
    /// Create credentials from a cloud id and API key.
    pub fn new(cloud_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_id", &self.cloud_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Outcome of making sure an index exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexProvisioning {
    /// The index was missing and has been created with the declared mapping.
    Created,
    /// The index was already present; nothing was changed.
    AlreadyExists,
}

/// A single bulk item the engine rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// Position of the record in the submitted batch.
    pub position: usize,
    /// The engine's reason for rejecting the item.
    pub reason: String,
}

/// Summary of a bulk index request.
///
/// Per-item failures do not fail the request as a whole; they are counted
/// here so callers can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Total number of actions submitted.
    pub total: usize,
    /// Number of actions the engine accepted.
    pub succeeded: usize,
    /// Number of actions the engine rejected.
    pub failed: usize,
    /// Details of each rejected action.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkReport {
    /// Report for a batch in which every action succeeded.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failed: 0,
            failures: vec![],
        }
    }

    /// Report for a batch with the given rejected items.
    pub fn with_failures(total: usize, failures: Vec<BulkItemFailure>) -> Self {
        let failed = failures.len().min(total);
        Self {
            total,
            succeeded: total - failed,
            failed,
            failures,
        }
    }
}

/// Raw hits returned by a match query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Total number of matching documents reported by the engine.
    pub total: u64,
    /// `_source` of each returned hit, in engine order.
    pub records: Vec<Record>,
}
