use super::errors::LocalFailure;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An image received from the client, held in memory for one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(data: Bytes, content_type: Option<String>, file_name: Option<String>) -> Self {
        Self {
            data,
            content_type,
            file_name,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Reject images larger than `limit` bytes.
    pub fn ensure_within(&self, limit: usize) -> Result<(), LocalFailure> {
        if self.size() > limit {
            return Err(LocalFailure::ImageTooLarge { limit });
        }
        Ok(())
    }
}

/// Endpoint and key of the remote prediction service.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub endpoint: String,
    #[validate(length(min = 1))]
    pub api_key: String,
}

impl Credentials {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, validator::ValidationErrors> {
        let credentials = Self {
            endpoint: endpoint.trim().to_string(),
            api_key: api_key.trim().to_string(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Build credentials from optional configuration values.
    ///
    /// Missing or blank values yield `LocalFailure::MissingCredentials`.
    pub fn from_parts(
        endpoint: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Self, LocalFailure> {
        match (endpoint, api_key) {
            (Some(endpoint), Some(api_key)) => {
                Self::new(endpoint.to_string(), api_key.to_string())
                    .map_err(|_| LocalFailure::MissingCredentials)
            }
            _ => Err(LocalFailure::MissingCredentials),
        }
    }
}

// The key never reaches logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// The outbound call: raw image bytes plus where and how to send them.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub image: Bytes,
    pub credentials: Credentials,
}

impl ClassificationRequest {
    pub fn new(image: Bytes, credentials: Credentials) -> Self {
        Self { image, credentials }
    }
}

/// Whatever the remote service answered with. Its shape is not interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult(pub serde_json::Value);

impl ClassificationResult {
    /// Parse a response body as JSON, falling back to a JSON string.
    pub fn from_body(body: &[u8]) -> Self {
        Self(body_to_value(body))
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Interpret a remote body as JSON, or as a plain string when it is not JSON.
pub fn body_to_value(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
}
