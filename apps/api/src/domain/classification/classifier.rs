use super::entity::{ClassificationRequest, ClassificationResult};
use super::errors::RelayError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Send one image to the remote service. Exactly one attempt, no retries.
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, RelayError>;
}
