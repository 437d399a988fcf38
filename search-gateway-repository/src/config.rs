//! Configuration types for the SearchIndexClient and engine connections.

use std::time::Duration;

/// Default number of hits returned by a match query.
pub const DEFAULT_MAX_HITS: usize = 10;

/// Configuration for the SearchIndexClient.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Maximum number of records returned by a single match query.
    pub max_hits: usize,
    /// Per-request timeout applied to engine calls.
    /// None leaves the HTTP client's own defaults in place.
    pub request_timeout: Option<Duration>,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            max_hits: DEFAULT_MAX_HITS,
            request_timeout: None,
        }
    }
}

impl SearchIndexConfig {
    /// Create a config with a custom hit limit. Zero is clamped to one.
    pub fn with_max_hits(max_hits: usize) -> Self {
        Self {
            max_hits: max_hits.max(1),
            ..Self::default()
        }
    }

    /// Set the per-request engine timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
