//! Loader module for the search gateway ingest.
//!
//! Parses uploaded documents into records and bulk loads them into an index.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::IngestError;
use search_gateway_repository::{BulkReport, SearchEngineClient};
use search_gateway_shared::Record;

/// Decode a full JSON document into records.
///
/// The document must be an array whose elements are all objects. Nothing is
/// returned for a partially valid document.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, IngestError> {
    let document: Value = serde_json::from_slice(bytes)?;

    let Value::Array(items) = document else {
        return Err(IngestError::parse("document must be a JSON array of objects"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(IngestError::parse(format!(
                "element {} is not an object (found {})",
                position,
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Read and decode the JSON document at `path`.
pub async fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>, IngestError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read upload document");
    parse_records(&bytes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loader that writes records into the search engine in one bulk call.
pub struct BatchLoader {
    client: Arc<dyn SearchEngineClient>,
}

impl BatchLoader {
    /// Create a new batch loader with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Index every record into `index`.
    ///
    /// An empty batch sends no request. Items the engine rejects are counted
    /// in the report; a failure of the bulk call itself is returned.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn load(&self, index: &str, records: &[Record]) -> Result<BulkReport, IngestError> {
        if records.is_empty() {
            debug!("Nothing to load");
            return Ok(BulkReport::default());
        }

        let report = self
            .client
            .bulk_index(index, records)
            .await
            .inspect_err(|e| error!(error = %e, "Bulk load failed"))?;

        if report.failed > 0 {
            for failure in &report.failures {
                warn!(position = failure.position, reason = %failure.reason, "Record rejected");
            }
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Bulk load completed"
        );

        Ok(report)
    }

    /// Read the JSON document at `path` and index its records into `index`.
    pub async fn load_file(
        &self,
        index: &str,
        path: impl AsRef<Path>,
    ) -> Result<BulkReport, IngestError> {
        let records = read_records(path).await?;
        self.load(index, &records).await
    }
}
