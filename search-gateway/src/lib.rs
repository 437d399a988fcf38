//! # Search Gateway
//!
//! HTTP gateway in front of a managed Elasticsearch/OpenSearch cluster.
//!
//! Callers upload JSON arrays of car records, which are bulk loaded into an
//! index provisioned with a fixed car mapping, and run single-field match
//! queries against it. Every request connects with the credentials it
//! carries; the catalog route uses credentials from configuration.
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/load-data` | Multipart upload (`file`, `cloud_id`, `api_key`, `index_name`) |
//! | GET | `/search` | Match query (`cloud_id`, `api_key`, `index_name`, `keyword`, `mname`) |
//! | POST | `/` | Catalog search (`{"searchTerm": ...}`) |
//! | GET | `/health` | Health check |

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{Dependencies, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Errors that can occur during gateway initialization or execution.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GatewayError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Creates the Axum application for the given state.
///
/// Applies the upload size limit, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    info!(
        cors_origins = %config.cors_origins,
        max_upload_bytes = config.max_upload_bytes,
        "Creating gateway router"
    );

    routes::create_routes(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(build_cors_layer(&config))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.trim() == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
/// * `format` - Human readable or JSON output
pub fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(level)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

/// Filter directive applying `level` to the gateway crates and the HTTP trace layer.
fn default_log_filter(level: &str) -> String {
    format!(
        "search_gateway={level},search_gateway_repository={level},search_gateway_ingest={level},tower_http={level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_follows_level() {
        let filter = default_log_filter("error");

        assert!(filter.contains("search_gateway=error"));
        assert!(filter.contains("tower_http=error"));
        assert!(!filter.contains("debug"));
    }
}
