use crate::{
    application::classify_image::use_case::ClassifyImageUseCase, config::Config,
    domain::classification::classifier::ImageClassifier,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub classify_image: Arc<ClassifyImageUseCase>,
}

impl AppState {
    pub fn new(config: Config, classifier: Arc<dyn ImageClassifier>) -> Self {
        let classify_image = Arc::new(ClassifyImageUseCase::from_config(classifier, &config));
        Self {
            config,
            classify_image,
        }
    }
}
