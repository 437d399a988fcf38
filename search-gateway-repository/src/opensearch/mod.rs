//! OpenSearch implementation of the search engine client.
//!
//! This module provides concrete implementations of `SearchEngineClient` and
//! `SearchEngineConnector` using the OpenSearch Rust client, which speaks the
//! REST protocol shared with Elasticsearch clusters.

mod api_key;
mod client;
mod cloud_id;
mod connector;
mod queries;

pub use api_key::ApiKey;
pub use client::OpenSearchClient;
pub use cloud_id::CloudId;
pub use connector::OpenSearchConnector;
pub use queries::{build_bulk_body, build_match_query};
