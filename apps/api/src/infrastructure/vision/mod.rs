pub mod custom_vision_client;

pub use custom_vision_client::{CustomVisionClient, PREDICTION_KEY_HEADER};
