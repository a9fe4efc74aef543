use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Product {0} does not exist")]
    UnknownProduct(ProductId),

    #[error("Product {0} is not in the cart")]
    ItemNotInCart(ProductId),

    #[error("Cart total is too large")]
    TotalTooLarge,

    #[error(transparent)]
    Product(ProductError),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(CartError);

impl Classify for CartError {
    fn class(&self) -> ErrorClass {
        match self {
            CartError::NotFound(_) | CartError::UnknownProduct(_) | CartError::ItemNotInCart(_) => {
                ErrorClass::NotFound
            }
            CartError::InvalidQuantity | CartError::TotalTooLarge => ErrorClass::Validation,
            CartError::Product(inner) => inner.class(),
            CartError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
