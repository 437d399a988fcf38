//! API key decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use opensearch::auth::Credentials as TransportCredentials;

use crate::errors::ConnectError;

/// An API key split into its id and secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// The key id.
    pub id: String,
    /// The key secret.
    pub secret: String,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl ApiKey {
    /// Decode an API key given either as `base64(id:secret)` or as the raw
    /// `id:secret` pair.
    pub fn parse(api_key: &str) -> Result<Self, ConnectError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConnectError::malformed("api_key is required"));
        }

        // Base64 never contains ':', so its presence means the raw form.
        let pair = if api_key.contains(':') {
            api_key.to_string()
        } else {
            let decoded = STANDARD.decode(api_key).map_err(|e| {
                ConnectError::malformed(format!("api_key is not valid base64: {}", e))
            })?;
            String::from_utf8(decoded)
                .map_err(|e| ConnectError::malformed(format!("api_key is not valid UTF-8: {}", e)))?
        };

        match pair.split_once(':') {
            Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(Self {
                id: id.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(ConnectError::malformed(
                "api_key must encode an <id>:<secret> pair",
            )),
        }
    }

    /// Transport credentials for the OpenSearch client.
    pub fn to_transport_credentials(&self) -> TransportCredentials {
        TransportCredentials::ApiKey(self.id.clone(), self.secret.clone())
    }
}
