//! HTTP error handling and response conversion.
//!
//! Every `RelayError` maps to one status code and a small JSON envelope. The
//! remote service's own status is passed through when it rejected the image.

use crate::domain::classification::errors::{LocalFailure, RelayError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

pub const REMOTE_REJECTED_MESSAGE: &str = "Error from Azure Custom Vision API";
pub const REMOTE_UNREACHABLE_MESSAGE: &str = "No response received from Azure Custom Vision API.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

impl RelayError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RemoteRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::RemoteUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::LocalFailure(failure) => match failure {
                LocalFailure::MissingImage | LocalFailure::InvalidUpload(_) => {
                    StatusCode::BAD_REQUEST
                }
                LocalFailure::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                LocalFailure::MissingCredentials | LocalFailure::Unexpected(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// JSON body sent to the client.
    fn body(&self) -> Value {
        match self {
            Self::RemoteRejected { details, .. } => json!({
                "error": REMOTE_REJECTED_MESSAGE,
                "details": details,
            }),
            Self::RemoteUnreachable(_) => json!({ "error": REMOTE_UNREACHABLE_MESSAGE }),
            Self::LocalFailure(LocalFailure::MissingCredentials) => json!({
                "error": format!("Server configuration error: {}", LocalFailure::MissingCredentials),
            }),
            Self::LocalFailure(LocalFailure::Unexpected(msg)) if msg.trim().is_empty() => {
                json!({ "error": UNKNOWN_ERROR_MESSAGE })
            }
            Self::LocalFailure(failure) => json!({ "error": failure.to_string() }),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "error={}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "error={}", self);
        }

        (status, Json(self.body())).into_response()
    }
}
