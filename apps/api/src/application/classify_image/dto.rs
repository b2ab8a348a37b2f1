use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const CLASSIFIED_MESSAGE: &str = "Image classified successfully!";

/// Body returned to the browser when the remote service accepted the image.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassifyImageResponse {
    pub message: String,
    /// Remote payload, relayed verbatim.
    #[ts(type = "unknown")]
    pub results: serde_json::Value,
}

impl ClassifyImageResponse {
    pub fn classified(results: serde_json::Value) -> Self {
        Self {
            message: CLASSIFIED_MESSAGE.to_string(),
            results,
        }
    }
}
