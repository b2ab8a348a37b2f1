use thiserror::Error;

/// Outcome of a failed classification relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The remote service answered with a non-success status.
    #[error("Remote service rejected the image with status {status}")]
    RemoteRejected {
        status: u16,
        details: serde_json::Value,
    },

    /// The request went out but no response came back.
    #[error("No response from remote service: {0}")]
    RemoteUnreachable(String),

    #[error(transparent)]
    LocalFailure(#[from] LocalFailure),
}

/// Failures that happen on this side of the wire.
#[derive(Debug, Error)]
pub enum LocalFailure {
    #[error("No image file provided.")]
    MissingImage,

    #[error("Azure credentials missing")]
    MissingCredentials,

    #[error("Image exceeds the {limit} byte upload limit")]
    ImageTooLarge { limit: usize },

    #[error("{0}")]
    InvalidUpload(String),

    #[error("{0}")]
    Unexpected(String),
}
