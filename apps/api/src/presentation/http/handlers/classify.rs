use crate::{
    application::classify_image::dto::ClassifyImageResponse,
    domain::classification::{
        entity::UploadedImage,
        errors::{LocalFailure, RelayError},
    },
    presentation::http::state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError, multipart::MultipartRejection},
    http::StatusCode,
};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

pub async fn classify_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassifyImageResponse>, RelayError> {
    let image = match multipart {
        Ok(multipart) => read_image(multipart, state.config.max_upload_bytes).await?,
        Err(rejection) => {
            tracing::debug!("Request is not multipart: {}", rejection);
            None
        }
    };

    let response = state.classify_image.execute(image).await?;
    Ok(Json(response))
}

/// Pull the single image file out of a multipart body.
///
/// Text fields are skipped. Any other file, or a second image, is rejected.
async fn read_image(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<Option<UploadedImage>, LocalFailure> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure(e, max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        if name != IMAGE_FIELD || image.is_some() {
            return Err(LocalFailure::InvalidUpload(format!(
                "Unexpected field: {}",
                name
            )));
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_failure(e, max_upload_bytes))?;

        tracing::debug!(
            file_name = %file_name,
            content_type = content_type.as_deref().unwrap_or("unknown"),
            size = data.len(),
            "Received image upload"
        );
        image = Some(UploadedImage::new(data, content_type, Some(file_name)));
    }

    Ok(image)
}

fn multipart_failure(err: MultipartError, max_upload_bytes: usize) -> LocalFailure {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        LocalFailure::ImageTooLarge {
            limit: max_upload_bytes,
        }
    } else {
        LocalFailure::InvalidUpload(err.body_text())
    }
}
