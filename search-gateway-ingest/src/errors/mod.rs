//! Error types for the search gateway ingest.

use search_gateway_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while loading uploaded data.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The upload could not be read.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The upload is not a JSON array of objects.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl IngestError {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
