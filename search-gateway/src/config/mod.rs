//! Server configuration for the search gateway.
//!
//! Values come from command line flags, falling back to environment
//! variables (a `.env` file is loaded first by the binary).
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_HOST` | 127.0.0.1 | Host to bind |
//! | `GATEWAY_PORT` | 5000 | Server port |
//! | `GATEWAY_LOG_LEVEL` | info | Log level |
//! | `LOG_FORMAT` | text | `text` or `json` |
//! | `GATEWAY_MAX_UPLOAD_BYTES` | 10485760 | Max request body (bytes) |
//! | `GATEWAY_CORS_ORIGINS` | * | Allowed origins |
//! | `GATEWAY_UPLOAD_DIR` | system temp dir | Where uploads are staged |
//! | `SEARCH_MAX_HITS` | 10 | Records returned per match query |
//! | `SEARCH_REQUEST_TIMEOUT_SECS` | unset | Per-request engine timeout |
//! | `CATALOG_CLOUD_ID` | unset | Cloud id used by the catalog route |
//! | `CATALOG_API_KEY` | unset | API key used by the catalog route |
//! | `CATALOG_INDEX` | cars | Catalog index name |
//! | `CATALOG_FIELD` | Name | Field the catalog route matches on |
//! | `CATALOG_DATA_FILE` | cars.json | Local file loaded by the catalog route |

pub mod dependencies;

pub use dependencies::Dependencies;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use search_gateway_repository::config::DEFAULT_MAX_HITS;
use search_gateway_repository::{Credentials, SearchIndexConfig};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Server configuration for the search gateway.
#[derive(Clone, Parser)]
#[command(name = "search-gateway")]
#[command(about = "HTTP gateway for loading and querying car catalog data")]
pub struct ServerConfig {
    /// Host address to bind to.
    #[arg(long, env = "GATEWAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "GATEWAY_PORT", default_value = "5000")]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "GATEWAY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Maximum request body size in bytes, uploads included.
    #[arg(long, env = "GATEWAY_MAX_UPLOAD_BYTES", default_value = "10485760")]
    pub max_upload_bytes: usize,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "GATEWAY_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Directory uploads are staged in while a request runs.
    #[arg(long, env = "GATEWAY_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Maximum number of records returned by a match query.
    #[arg(long, env = "SEARCH_MAX_HITS", default_value_t = DEFAULT_MAX_HITS)]
    pub search_max_hits: usize,

    /// Per-request engine timeout in seconds.
    #[arg(long, env = "SEARCH_REQUEST_TIMEOUT_SECS")]
    pub search_request_timeout_secs: Option<u64>,

    /// Cloud id used by the catalog route.
    #[arg(long, env = "CATALOG_CLOUD_ID", hide_env_values = true)]
    pub catalog_cloud_id: Option<String>,

    /// API key used by the catalog route.
    #[arg(long, env = "CATALOG_API_KEY", hide_env_values = true)]
    pub catalog_api_key: Option<String>,

    /// Index the catalog route provisions, loads and queries.
    #[arg(long, env = "CATALOG_INDEX", default_value = "cars")]
    pub catalog_index: String,

    /// Field the catalog route matches the search term against.
    #[arg(long, env = "CATALOG_FIELD", default_value = "Name")]
    pub catalog_field: String,

    /// Local JSON file the catalog route loads before searching.
    #[arg(long, env = "CATALOG_DATA_FILE", default_value = "cars.json")]
    pub catalog_data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
            cors_origins: "*".to_string(),
            upload_dir: None,
            search_max_hits: DEFAULT_MAX_HITS,
            search_request_timeout_secs: None,
            catalog_cloud_id: None,
            catalog_api_key: None,
            catalog_index: "cars".to_string(),
            catalog_field: "Name".to_string(),
            catalog_data_file: PathBuf::from("cars.json"),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine client settings derived from this configuration.
    pub fn search_config(&self) -> SearchIndexConfig {
        let config = SearchIndexConfig::with_max_hits(self.search_max_hits);
        match self.search_request_timeout_secs {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Credentials for the catalog route, if both halves are configured.
    pub fn catalog_credentials(&self) -> Option<Credentials> {
        match (&self.catalog_cloud_id, &self.catalog_api_key) {
            (Some(cloud_id), Some(api_key))
                if !cloud_id.trim().is_empty() && !api_key.trim().is_empty() =>
            {
                Some(Credentials::new(cloud_id.clone(), api_key.clone()))
            }
            _ => None,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_upload_bytes == 0 {
            errors.push("Max upload size cannot be 0".to_string());
        }

        if self.search_max_hits == 0 {
            errors.push("Search max hits cannot be 0".to_string());
        }

        if self.search_request_timeout_secs == Some(0) {
            errors.push("Search request timeout cannot be 0".to_string());
        }

        if self.catalog_index.trim().is_empty() {
            errors.push("Catalog index cannot be empty".to_string());
        }

        if self.catalog_cloud_id.is_some() != self.catalog_api_key.is_some() {
            errors.push("Catalog cloud id and API key must be set together".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
