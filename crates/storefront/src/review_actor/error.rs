use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Reviews not found: {0}")]
    NotFound(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("You already reviewed this product")]
    AlreadyReviewed,

    #[error("Product {0} does not exist")]
    UnknownProduct(ProductId),

    #[error(transparent)]
    Product(ProductError),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(ReviewError);

impl Classify for ReviewError {
    fn class(&self) -> ErrorClass {
        match self {
            ReviewError::NotFound(_) | ReviewError::UnknownProduct(_) => ErrorClass::NotFound,
            ReviewError::InvalidRating(_) => ErrorClass::Validation,
            ReviewError::AlreadyReviewed => ErrorClass::Conflict,
            ReviewError::Product(inner) => inner.class(),
            ReviewError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
