//! Error types for the HTTP boundary.
//!
//! Every failure is answered with `{"error": "<message>"}` and a status code
//! chosen by the error's kind:
//!
//! | Kind | HTTP Status |
//! |------|-------------|
//! | missing or malformed input, unknown field | 400 |
//! | credentials rejected by the engine | 401 |
//! | connection, engine, configuration or IO failure | 500 |

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use search_gateway_ingest::IngestError;
use search_gateway_repository::{ConnectError, SearchError};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required form field or query parameter is absent.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// The request carried input that cannot be used.
    #[error("{0}")]
    InvalidInput(String),

    /// The multipart body could not be read.
    #[error("Invalid upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    /// The engine rejected the supplied credentials.
    #[error("{0}")]
    Authentication(String),

    /// The engine could not be reached.
    #[error("Failed to connect to search engine: {0}")]
    Connection(String),

    /// The engine failed while serving the request.
    #[error("{0}")]
    Engine(String),

    /// The server is missing configuration the request needs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local file handling failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create an invalid input error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Connection(_) | Self::Engine(_) | Self::Configuration(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status_code = status.as_u16(), message = %message, "Request failed");
        } else {
            tracing::warn!(status_code = status.as_u16(), message = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ConnectError> for ApiError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::MalformedInput(msg) => Self::InvalidInput(msg),
            ConnectError::Authentication(msg) => Self::Authentication(msg),
            ConnectError::Network(msg) => Self::Connection(msg),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        if err.is_client_error() {
            Self::InvalidInput(err.to_string())
        } else {
            Self::Engine(err.to_string())
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::ParseError(msg) => {
                Self::InvalidInput(format!("Upload must be a JSON array of objects: {}", msg))
            }
            IngestError::SearchError(e) => e.into(),
            IngestError::IoError(e) => Self::Io(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::InvalidInput(err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(err: MultipartRejection) -> Self {
        Self::InvalidInput(err.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self::InvalidInput(err.body_text())
    }
}
