//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, mock).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{BulkReport, SearchHits};
use search_gateway_shared::{MatchQuery, Record};

/// Abstract interface for an open handle to the search engine.
///
/// This trait covers the narrow set of engine operations the gateway needs.
/// Implementations can be swapped for different backends (OpenSearch, mock, etc.)
/// enabling easy testing.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index exists
    /// * `Ok(false)` - If it does not
    /// * `Err(SearchError)` - If the check could not be performed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index with the given settings and mappings body.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - The create-index request body (settings and mappings)
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchError::IndexCreationError)` - If creation fails
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError>;

    /// Index every record into `index` in a single bulk request.
    ///
    /// Records are submitted in order, one `index` action each. Items the
    /// engine rejects are reported in the returned summary rather than
    /// failing the call.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkReport)` - Aggregate and per-item outcome
    /// * `Err(SearchError::BulkIndexError)` - If the bulk request as a whole fails
    async fn bulk_index(&self, index: &str, records: &[Record]) -> Result<BulkReport, SearchError>;

    /// Execute a single-field match query.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to search
    /// * `query` - The field and value to match
    /// * `size` - Maximum number of hits to return
    ///
    /// # Returns
    ///
    /// * `Ok(SearchHits)` - Matching records in engine order
    /// * `Err(SearchError)` - If the search fails
    async fn search(
        &self,
        index: &str,
        query: &MatchQuery,
        size: usize,
    ) -> Result<SearchHits, SearchError>;
}
