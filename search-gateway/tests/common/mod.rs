//! Common test utilities for the gateway HTTP tests.
//!
//! Provides an in-memory search engine and a connector that decodes
//! credentials the same way the real one does before handing it out.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use search_gateway::{create_app, AppState, ServerConfig};
use search_gateway_repository::opensearch::{ApiKey, CloudId};
use search_gateway_repository::{
    BulkReport, ConnectError, Credentials, SearchEngineClient, SearchEngineConnector, SearchError,
    SearchHits,
};
use search_gateway_shared::{MatchQuery, Record};

/// API key id the in-memory engine accepts.
pub const ACCEPTED_KEY_ID: &str = "gateway-test";

/// A cloud id that decodes to a valid deployment URL.
pub fn cloud_id() -> String {
    format!(
        "catalog:{}",
        STANDARD.encode("us-central1.gcp.cloud.es.io:443$es123$kb456")
    )
}

/// An encoded API key the in-memory engine accepts.
pub fn api_key() -> String {
    STANDARD.encode(format!("{}:secret", ACCEPTED_KEY_ID))
}

/// An encoded API key the in-memory engine rejects.
pub fn rejected_api_key() -> String {
    STANDARD.encode("someone-else:secret")
}

/// In-memory stand-in for the search engine.
#[derive(Default)]
pub struct InMemoryEngine {
    indexes: Mutex<HashMap<String, Vec<Record>>>,
    mappings: Mutex<HashMap<String, Value>>,
    pub bulk_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl InMemoryEngine {
    /// Records stored in `index`, if it exists.
    pub fn records(&self, index: &str) -> Option<Vec<Record>> {
        self.indexes.lock().unwrap().get(index).cloned()
    }

    /// Mapping `index` was created with.
    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.mappings.lock().unwrap().get(index).cloned()
    }

    fn matches(record: &Record, query: &MatchQuery) -> bool {
        let wanted: Vec<String> = query
            .value
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        match record.get(&query.field) {
            Some(Value::String(text)) => text
                .split_whitespace()
                .map(str::to_lowercase)
                .any(|token| wanted.contains(&token)),
            Some(other) => other.to_string() == query.value,
            None => false,
        }
    }
}

#[async_trait]
impl SearchEngineClient for InMemoryEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        Ok(self.indexes.lock().unwrap().contains_key(index))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.indexes
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default();
        self.mappings
            .lock()
            .unwrap()
            .insert(index.to_string(), body.clone());
        Ok(())
    }

    async fn bulk_index(&self, index: &str, records: &[Record]) -> Result<BulkReport, SearchError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.indexes
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .extend(records.iter().cloned());
        Ok(BulkReport::all_succeeded(records.len()))
    }

    async fn search(
        &self,
        index: &str,
        query: &MatchQuery,
        size: usize,
    ) -> Result<SearchHits, SearchError> {
        let indexes = self.indexes.lock().unwrap();
        let records = indexes
            .get(index)
            .ok_or_else(|| SearchError::query(format!("no such index [{}]", index)))?;

        let matching: Vec<Record> = records
            .iter()
            .filter(|record| Self::matches(record, query))
            .cloned()
            .collect();

        Ok(SearchHits {
            total: matching.len() as u64,
            records: matching.into_iter().take(size).collect(),
        })
    }
}

/// Connector handing out the shared in-memory engine.
pub struct InMemoryConnector {
    engine: Arc<InMemoryEngine>,
    pub connects: AtomicUsize,
}

impl InMemoryConnector {
    pub fn new(engine: Arc<InMemoryEngine>) -> Self {
        Self {
            engine,
            connects: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SearchEngineConnector for InMemoryConnector {
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectError> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        CloudId::parse(&credentials.cloud_id)?;
        let key = ApiKey::parse(&credentials.api_key)?;
        if key.id != ACCEPTED_KEY_ID {
            return Err(ConnectError::from_probe_status(401, "unknown api key"));
        }

        Ok(self.engine.clone())
    }
}

/// A running test server plus handles into its engine.
pub struct TestContext {
    pub server: TestServer,
    pub engine: Arc<InMemoryEngine>,
    pub connector: Arc<InMemoryConnector>,
}

/// Build a test server around a fresh in-memory engine.
pub fn test_context(config: ServerConfig) -> TestContext {
    let engine = Arc::new(InMemoryEngine::default());
    let connector = Arc::new(InMemoryConnector::new(engine.clone()));
    let state = AppState::new(connector.clone(), config);
    let server = TestServer::new(create_app(state)).expect("Failed to create test server");

    TestContext {
        server,
        engine,
        connector,
    }
}
