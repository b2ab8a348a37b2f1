use crate::domain::classification::{
    classifier::ImageClassifier,
    entity::{ClassificationRequest, ClassificationResult, body_to_value},
    errors::{LocalFailure, RelayError},
};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};

/// Header Custom Vision reads the prediction key from.
pub const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

/// Relays images to an Azure Custom Vision prediction endpoint.
///
/// The endpoint and key travel with each `ClassificationRequest`; the client
/// itself only owns the connection pool, built with the call timeout.
pub struct CustomVisionClient {
    client: Client,
}

impl CustomVisionClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageClassifier for CustomVisionClient {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, RelayError> {
        let ClassificationRequest { image, credentials } = request;
        let image_size = image.len();

        let response = self
            .client
            .post(&credentials.endpoint)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(PREDICTION_KEY_HEADER, &credentials.api_key)
            .body(image)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let details = body_to_value(&body);
            warn!(
                status = status.as_u16(),
                details = %details,
                "Custom Vision rejected the image"
            );
            return Err(RelayError::RemoteRejected {
                status: status.as_u16(),
                details,
            });
        }

        debug!(
            status = status.as_u16(),
            image_size,
            response_size = body.len(),
            "Custom Vision classified the image"
        );
        Ok(ClassificationResult::from_body(&body))
    }
}

// === HTTP Client Error Conversion ===

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            tracing::error!(reqwest_builder = %err);
            RelayError::LocalFailure(LocalFailure::Unexpected(err.to_string()))
        } else if err.is_timeout() {
            tracing::warn!(reqwest_timeout = %err);
            RelayError::RemoteUnreachable(err.to_string())
        } else if err.is_connect() {
            tracing::warn!(reqwest_connect = %err);
            RelayError::RemoteUnreachable(err.to_string())
        } else if err.is_request() || err.is_body() {
            tracing::warn!(reqwest_request = %err);
            RelayError::RemoteUnreachable(err.to_string())
        } else {
            tracing::error!(reqwest_error = %err);
            RelayError::LocalFailure(LocalFailure::Unexpected(err.to_string()))
        }
    }
}
