//! Search index client implementation.
//!
//! This module provides the main client application code uses on top of an
//! open engine handle: provisioning the car index and running match lookups.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::SearchIndexConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::schema;
use crate::types::IndexProvisioning;
use search_gateway_shared::{MatchQuery, MatchResult};

/// The main client for provisioning and querying car indexes.
pub struct SearchIndexClient {
    engine: Arc<dyn SearchEngineClient>,
    config: SearchIndexConfig,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with default configuration.
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            engine,
            config: SearchIndexConfig::default(),
        }
    }

    /// Create a new SearchIndexClient with custom configuration.
    pub fn with_config(engine: Arc<dyn SearchEngineClient>, config: SearchIndexConfig) -> Self {
        Self { engine, config }
    }

    /// Make sure `index` exists with the car mapping.
    /// Input: index name
    /// Output: Result<IndexProvisioning, SearchError>
    ///
    /// An existing index is left untouched even if its mapping differs.
    #[instrument(skip(self))]
    pub async fn try_ensure_index(&self, index: &str) -> Result<IndexProvisioning, SearchError> {
        if index.trim().is_empty() {
            return Err(SearchError::index_creation("index name is required"));
        }

        if self.engine.index_exists(index).await? {
            debug!("Index already exists");
            return Ok(IndexProvisioning::AlreadyExists);
        }

        self.engine
            .create_index(index, &schema::index_mappings())
            .await?;

        info!("Index created with car mapping");
        Ok(IndexProvisioning::Created)
    }

    /// Make sure `index` exists with the car mapping, never failing the caller.
    ///
    /// Provisioning errors are logged and swallowed; a later load or query
    /// against a missing index reports its own error.
    pub async fn ensure_index(&self, index: &str) {
        if let Err(e) = self.try_ensure_index(index).await {
            warn!(index = %index, error = %e, "Failed to provision index");
        }
    }

    /// Run a single-field match query.
    /// Input: index name, MatchQuery (field must be part of the car schema)
    /// Output: Result<MatchResult, SearchError>
    ///
    /// At most `max_hits` records are returned, in engine order.
    #[instrument(skip(self, query), fields(field = %query.field))]
    pub async fn find(&self, index: &str, query: &MatchQuery) -> Result<MatchResult, SearchError> {
        if index.trim().is_empty() {
            return Err(SearchError::invalid_query("index name is required"));
        }
        if query.field.trim().is_empty() {
            return Err(SearchError::invalid_query("field name is required"));
        }
        if !schema::is_declared_field(&query.field) {
            return Err(SearchError::invalid_query(format!(
                "field '{}' is not part of the index schema",
                query.field
            )));
        }

        let hits = self
            .engine
            .search(index, query, self.config.max_hits)
            .await
            .inspect_err(|e| warn!(error = %e, "Match query failed"))?;

        let result = MatchResult::from_hits(hits.total, hits.records);
        match &result {
            MatchResult::Found { total, records } => {
                info!(total = total, returned = records.len(), value = %query.value, "Match query found records");
            }
            MatchResult::Empty => {
                info!(value = %query.value, "No documents matched");
            }
        }

        Ok(result)
    }
}
