//! Elastic Cloud id decoding.
//!
//! A cloud id has the form `label:base64(host[:port]$es_uuid[$kibana_uuid])`.
//! The Elasticsearch endpoint is `https://{es_uuid}.{host}:{port}`, with the
//! port defaulting to 443.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use url::Url;

use crate::errors::ConnectError;

const DEFAULT_PORT: u16 = 443;

/// A decoded Elastic Cloud id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudId {
    /// Deployment label (the part before the first `:`).
    pub label: String,
    /// Base URL of the Elasticsearch endpoint.
    pub url: Url,
}

impl CloudId {
    /// Decode a cloud id.
    ///
    /// # Returns
    ///
    /// * `Ok(CloudId)` - The label and resolved endpoint URL
    /// * `Err(ConnectError::MalformedInput)` - If any part cannot be decoded
    pub fn parse(cloud_id: &str) -> Result<Self, ConnectError> {
        let cloud_id = cloud_id.trim();
        if cloud_id.is_empty() {
            return Err(ConnectError::malformed("cloud_id is required"));
        }

        let (label, encoded) = cloud_id
            .split_once(':')
            .ok_or_else(|| ConnectError::malformed("cloud_id must have the form <label>:<data>"))?;
        if encoded.is_empty() {
            return Err(ConnectError::malformed("cloud_id data is empty"));
        }

        let decoded = STANDARD
            .decode(encoded)
            .or_else(|_| STANDARD_NO_PAD.decode(encoded))
            .map_err(|e| ConnectError::malformed(format!("cloud_id is not valid base64: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|e| ConnectError::malformed(format!("cloud_id is not valid UTF-8: {}", e)))?;

        let mut parts = decoded.split('$');
        let domain = parts.next().unwrap_or_default().trim();
        let es_uuid = parts.next().unwrap_or_default().trim();
        if domain.is_empty() || es_uuid.is_empty() {
            return Err(ConnectError::malformed(
                "cloud_id must contain a host and an Elasticsearch id",
            ));
        }

        let (host, port) = match domain.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    ConnectError::malformed(format!("cloud_id has an invalid port: {}", e))
                })?;
                (host, port)
            }
            None => (domain, DEFAULT_PORT),
        };

        let url = Url::parse(&format!("https://{}.{}:{}", es_uuid, host, port))
            .map_err(|e| ConnectError::malformed(format!("cloud_id yields an invalid URL: {}", e)))?;

        Ok(Self {
            label: label.to_string(),
            url,
        })
    }
}
