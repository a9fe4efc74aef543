use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Only {available} left in stock for \"{title}\" (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        title: String,
        requested: u32,
        available: u32,
    },

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("\"{0}\" appears in existing orders and cannot be deleted")]
    ReferencedByOrders(String),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(ProductError);

impl Classify for ProductError {
    fn class(&self) -> ErrorClass {
        match self {
            ProductError::NotFound(_) => ErrorClass::NotFound,
            ProductError::Validation(_) | ProductError::InvalidQuantity => ErrorClass::Validation,
            ProductError::InsufficientStock { .. } | ProductError::ReferencedByOrders(_) => {
                ErrorClass::Conflict
            }
            ProductError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
