//! Connection manager for managed OpenSearch/Elasticsearch clusters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::config::SearchIndexConfig;
use crate::errors::ConnectError;
use crate::interfaces::{SearchEngineClient, SearchEngineConnector};
use crate::opensearch::api_key::ApiKey;
use crate::opensearch::client::OpenSearchClient;
use crate::opensearch::cloud_id::CloudId;
use crate::types::Credentials;

/// Opens a fresh [`OpenSearchClient`] per call from a cloud id and API key.
#[derive(Debug, Clone, Default)]
pub struct OpenSearchConnector {
    config: SearchIndexConfig,
}

impl OpenSearchConnector {
    /// Create a connector applying the given client configuration.
    pub fn new(config: SearchIndexConfig) -> Self {
        Self { config }
    }

    async fn open(&self, credentials: &Credentials) -> Result<OpenSearchClient, ConnectError> {
        let cloud_id = CloudId::parse(&credentials.cloud_id)?;
        let api_key = ApiKey::parse(&credentials.api_key)?;

        let client =
            OpenSearchClient::new(cloud_id.url, Some(&api_key), self.config.request_timeout)?;
        client.ping().await?;

        Ok(client)
    }
}

#[async_trait]
impl SearchEngineConnector for OpenSearchConnector {
    #[instrument(skip_all)]
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectError> {
        match self.open(credentials).await {
            Ok(client) => {
                info!(url = %client.url(), "Connected to search engine");
                Ok(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Failed to connect to search engine");
                Err(e)
            }
        }
    }
}
