use crate::{
    application::classify_image::dto::ClassifyImageResponse,
    config::Config,
    domain::classification::{
        classifier::ImageClassifier,
        entity::{ClassificationRequest, Credentials, UploadedImage},
        errors::{LocalFailure, RelayError},
    },
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Relays one uploaded image to the remote classifier.
///
/// Validation runs fail-fast and in a fixed order: image presence, image size,
/// then credentials. Nothing is sent unless all three pass, and a failed
/// remote call is never retried.
pub struct ClassifyImageUseCase {
    classifier: Arc<dyn ImageClassifier>,
    endpoint: Option<String>,
    api_key: Option<String>,
    max_upload_bytes: usize,
}

impl ClassifyImageUseCase {
    pub fn new(
        classifier: Arc<dyn ImageClassifier>,
        endpoint: Option<String>,
        api_key: Option<String>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            classifier,
            endpoint,
            api_key,
            max_upload_bytes,
        }
    }

    pub fn from_config(classifier: Arc<dyn ImageClassifier>, config: &Config) -> Self {
        Self::new(
            classifier,
            config.custom_vision_endpoint.clone(),
            config.custom_vision_key.clone(),
            config.max_upload_bytes,
        )
    }

    /// Classify `image`, or explain why it could not be classified.
    ///
    /// # Errors
    /// - `LocalFailure::MissingImage` when no image was uploaded
    /// - `LocalFailure::ImageTooLarge` when the image exceeds the upload limit
    /// - `LocalFailure::MissingCredentials` when endpoint or key is unset
    /// - `RemoteRejected` / `RemoteUnreachable` from the outbound call
    #[instrument(skip_all, fields(
        image_size = image.as_ref().map(UploadedImage::size),
        content_type = image.as_ref().and_then(|i| i.content_type.as_deref()),
        file_name = image.as_ref().and_then(|i| i.file_name.as_deref()),
    ))]
    pub async fn execute(
        &self,
        image: Option<UploadedImage>,
    ) -> Result<ClassifyImageResponse, RelayError> {
        let image = image.ok_or(LocalFailure::MissingImage)?;
        image.ensure_within(self.max_upload_bytes)?;

        let credentials = Credentials::from_parts(
            self.endpoint.as_deref(),
            self.api_key.as_deref(),
        )
        .inspect_err(|_| {
            error!("Azure Custom Vision API credentials are not properly set");
        })?;

        let request = ClassificationRequest::new(image.data, credentials);
        let result = self.classifier.classify(request).await?;

        info!("Image classified");
        Ok(ClassifyImageResponse::classified(result.into_inner()))
    }
}
