//! # Search Gateway Repository
//!
//! This crate provides traits and implementations for talking to the external
//! search engine. It includes the error types, the engine and connector
//! interfaces, the fixed car index schema, and a concrete implementation for
//! OpenSearch/Elasticsearch compatible clusters.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod schema;
pub mod types;

pub use client::SearchIndexClient;
pub use config::SearchIndexConfig;
pub use errors::{ConnectError, SearchError};
pub use interfaces::{SearchEngineClient, SearchEngineConnector};
pub use opensearch::{OpenSearchClient, OpenSearchConnector};
pub use types::{BulkItemFailure, BulkReport, Credentials, IndexProvisioning, SearchHits};
