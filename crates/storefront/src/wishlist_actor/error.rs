use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Wishlist not found: {0}")]
    NotFound(String),

    #[error("Product {0} does not exist")]
    UnknownProduct(ProductId),

    #[error(transparent)]
    Product(ProductError),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(WishlistError);

impl Classify for WishlistError {
    fn class(&self) -> ErrorClass {
        match self {
            WishlistError::NotFound(_) | WishlistError::UnknownProduct(_) => ErrorClass::NotFound,
            WishlistError::Product(inner) => inner.class(),
            WishlistError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
