//! Connection error types.
//!
//! Opening a handle to the search engine can fail for distinct reasons that
//! callers react to differently, so each gets its own variant.

use thiserror::Error;

/// Errors that can occur while opening a connection to the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The cloud id or API key could not be decoded.
    #[error("Malformed connection input: {0}")]
    MalformedInput(String),

    /// The engine rejected the supplied credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The engine could not be reached or did not answer the liveness probe.
    #[error("Network error: {0}")]
    Network(String),
}

impl ConnectError {
    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Classify a non-success liveness probe status.
    pub fn from_probe_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::authentication(format!("status {}: {}", status, body)),
            _ => Self::network(format!("liveness probe returned status {}: {}", status, body)),
        }
    }
}
