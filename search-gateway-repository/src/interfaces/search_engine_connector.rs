//! Search engine connector trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ConnectError;
use crate::interfaces::SearchEngineClient;
use crate::types::Credentials;

/// Opens live handles to the search engine.
///
/// Each call builds a fresh handle from the supplied credentials and probes
/// the engine before returning it. Handles are not pooled or cached.
#[async_trait]
pub trait SearchEngineConnector: Send + Sync {
    /// Open and validate a handle to the engine.
    ///
    /// # Returns
    ///
    /// * `Ok(handle)` - A handle that answered the liveness probe
    /// * `Err(ConnectError::MalformedInput)` - If the credentials cannot be decoded
    /// * `Err(ConnectError::Authentication)` - If the engine rejected the credentials
    /// * `Err(ConnectError::Network)` - If the engine could not be reached
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectError>;
}
