//! Dependency initialization and wiring for the search gateway.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::GatewayError;
use search_gateway_repository::OpenSearchConnector;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The application state handed to the router.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from the parsed configuration.
    ///
    /// No engine connection is opened here; every request connects with
    /// the credentials it carries.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(GatewayError)` - If the configuration is invalid
    pub fn new(config: ServerConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|errors| GatewayError::config(errors.join("; ")))?;

        let search_config = config.search_config();

        info!(
            max_hits = search_config.max_hits,
            request_timeout = ?search_config.request_timeout,
            catalog_index = %config.catalog_index,
            catalog_data_file = %config.catalog_data_file.display(),
            "Initializing dependencies"
        );

        if config.catalog_credentials().is_none() {
            warn!("Catalog credentials not configured; POST / will answer 500");
        }

        if let Some(dir) = &config.upload_dir {
            if !dir.is_dir() {
                return Err(GatewayError::config(format!(
                    "Upload directory {} does not exist",
                    dir.display()
                )));
            }
        }

        let connector = OpenSearchConnector::new(search_config);
        let state = AppState::new(Arc::new(connector), config);

        Ok(Self { state })
    }
}
