use crate::error::{from_framework_error, Classify, ErrorClass};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeatureError {
    #[error("Feature image not found: {0}")]
    NotFound(String),

    #[error("Image URL is required")]
    MissingImage,

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(FeatureError);

impl Classify for FeatureError {
    fn class(&self) -> ErrorClass {
        match self {
            FeatureError::NotFound(_) => ErrorClass::NotFound,
            FeatureError::MissingImage => ErrorClass::Validation,
            FeatureError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
