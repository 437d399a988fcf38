//! Application state for the search gateway.
//!
//! Holds the engine connector and the server configuration. Engine handles
//! themselves are opened per request and never stored here.

use std::sync::Arc;

use search_gateway_repository::{SearchEngineConnector, SearchIndexConfig};

use crate::config::ServerConfig;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Opens engine handles from request credentials.
    connector: Arc<dyn SearchEngineConnector>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given connector and configuration.
    pub fn new(connector: Arc<dyn SearchEngineConnector>, config: ServerConfig) -> Self {
        Self {
            connector,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the engine connector.
    pub fn connector(&self) -> &dyn SearchEngineConnector {
        self.connector.as_ref()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Engine client settings for lookups.
    pub fn search_config(&self) -> SearchIndexConfig {
        self.config.search_config()
    }
}
