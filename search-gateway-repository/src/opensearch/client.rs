//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::{ConnectError, SearchError};
use crate::interfaces::SearchEngineClient;
use crate::opensearch::api_key::ApiKey;
use crate::opensearch::queries::{build_bulk_body, build_match_query};
use crate::types::{BulkItemFailure, BulkReport, SearchHits};
use search_gateway_shared::{MatchQuery, Record};

/// OpenSearch client implementation.
///
/// Talks to any cluster that speaks the OpenSearch/Elasticsearch REST API.
///
/// # Example
///
/// ```ignore
/// let url = Url::parse("http://localhost:9200")?;
/// let client = OpenSearchClient::new(url, None, None)?;
/// client.ping().await?;
///
/// let hits = client.search("cars", &MatchQuery::new("Name", "civic"), 10).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    url: Url,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is sent; call [`OpenSearchClient::ping`] to verify the
    /// engine is reachable.
    ///
    /// # Arguments
    ///
    /// * `url` - The engine base URL
    /// * `api_key` - Optional API key sent with every request
    /// * `timeout` - Optional per-request timeout
    pub fn new(
        url: Url,
        api_key: Option<&ApiKey>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConnectError> {
        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(api_key) = api_key {
            builder = builder.auth(api_key.to_transport_credentials());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| ConnectError::network(e.to_string()))?;

        let client = OpenSearch::new(transport);

        debug!(url = %url, "Created OpenSearch client");

        Ok(Self { client, url })
    }

    /// The engine base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Liveness probe against the engine root endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The engine answered with a success status
    /// * `Err(ConnectError::Authentication)` - The engine answered 401 or 403
    /// * `Err(ConnectError::Network)` - Transport failure or another status
    pub async fn ping(&self) -> Result<(), ConnectError> {
        let response = self.client.ping().send().await.map_err(|e| {
            match e.status_code().map(|status| status.as_u16()) {
                Some(status @ (401 | 403)) => ConnectError::from_probe_status(status, &e.to_string()),
                _ => ConnectError::network(e.to_string()),
            }
        })?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::from_probe_status(status.as_u16(), &body));
        }

        Ok(())
    }

    /// Summarize a bulk response body.
    ///
    /// Items carrying an `error` object are counted as failures; all others
    /// as successes.
    fn parse_bulk_response(body: &Value, total: usize) -> BulkReport {
        let has_errors = body.get("errors").and_then(Value::as_bool).unwrap_or(false);
        if !has_errors {
            return BulkReport::all_succeeded(total);
        }

        let failures: Vec<BulkItemFailure> = body
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| {
                        let error = item.get("index")?.get("error")?;
                        let reason = error
                            .get("reason")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        Some(BulkItemFailure { position, reason })
                    })
                    .collect()
            })
            .unwrap_or_default();

        BulkReport::with_failures(total, failures)
    }

    /// Extract the total and `_source` of each hit from a search response.
    fn parse_search_response(body: &Value) -> Result<SearchHits, SearchError> {
        let hits = body
            .get("hits")
            .ok_or_else(|| SearchError::parse("search response has no hits section"))?;

        // Newer engines report `{ "value": n }`, older ones a bare number.
        let total = match hits.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(total) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
            None => 0,
        };

        let records: Vec<Record> = hits
            .get("hits")
            .and_then(Value::as_array)
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit.get("_source")?.as_object().cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(SearchHits { total, records })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchError::index_creation(format!(
                "Index existence check failed with status {}",
                status
            ))),
        }
    }

    #[instrument(skip_all, fields(index = %index))]
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            // Lost a creation race with another request; the index is there.
            if error_body.contains("resource_already_exists_exception") {
                debug!("Index created concurrently");
                return Ok(());
            }

            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!("Index created");
        Ok(())
    }

    #[instrument(skip_all, fields(index = %index, count = records.len()))]
    async fn bulk_index(&self, index: &str, records: &[Record]) -> Result<BulkReport, SearchError> {
        if records.is_empty() {
            return Ok(BulkReport::default());
        }

        let body: Vec<JsonBody<Value>> = build_bulk_body(index, records)
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let report = Self::parse_bulk_response(&response_body, records.len());
        if report.failed > 0 {
            warn!(
                succeeded = report.succeeded,
                failed = report.failed,
                "Bulk request completed with rejected items"
            );
        } else {
            debug!(succeeded = report.succeeded, "Bulk request completed");
        }

        Ok(report)
    }

    #[instrument(skip_all, fields(index = %index, field = %query.field))]
    async fn search(
        &self,
        index: &str,
        query: &MatchQuery,
        size: usize,
    ) -> Result<SearchHits, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(build_match_query(query, size))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");

            // 400 means the engine could not apply the query to this field.
            if status.as_u16() == 400 {
                return Err(SearchError::invalid_query(error_body));
            }
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Self::parse_search_response(&response_body)
    }
}
