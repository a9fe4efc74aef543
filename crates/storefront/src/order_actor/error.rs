use crate::cart_actor::CartError;
use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::{Money, OrderStatus, ProductId};
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Shipping address is incomplete, missing: {}", .0.join(", "))]
    InvalidAddress(Vec<&'static str>),

    #[error("Quantity for product {0} must be at least 1")]
    InvalidQuantity(ProductId),

    #[error("{0}")]
    Validation(String),

    #[error("Only {available} left in stock for \"{title}\" (requested {requested})")]
    StockInsufficient {
        product_id: ProductId,
        title: String,
        requested: u32,
        available: u32,
    },

    #[error("Product {0} is no longer available")]
    ProductUnavailable(String),

    #[error("Order total is too large")]
    TotalTooLarge,

    #[error("Prices changed since checkout: total is now {actual}, not {expected}")]
    PriceChanged { expected: Money, actual: Money },

    #[error("An order that is {from} cannot be moved to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Product(ProductError),

    #[error(transparent)]
    Cart(CartError),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(OrderError);

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::InsufficientStock {
                product_id,
                title,
                requested,
                available,
            } => OrderError::StockInsufficient {
                product_id,
                title,
                requested,
                available,
            },
            ProductError::NotFound(id) => OrderError::ProductUnavailable(id),
            other => OrderError::Product(other),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(e: CartError) -> Self {
        OrderError::Cart(e)
    }
}

impl Classify for OrderError {
    fn class(&self) -> ErrorClass {
        match self {
            OrderError::NotFound(_) | OrderError::ProductUnavailable(_) => ErrorClass::NotFound,
            OrderError::EmptyCart
            | OrderError::InvalidAddress(_)
            | OrderError::InvalidQuantity(_)
            | OrderError::TotalTooLarge
            | OrderError::Validation(_) => ErrorClass::Validation,
            OrderError::StockInsufficient { .. }
            | OrderError::PriceChanged { .. }
            | OrderError::InvalidTransition { .. } => ErrorClass::Conflict,
            OrderError::Unauthorized(_) => ErrorClass::Unauthorized,
            OrderError::Product(inner) => inner.class(),
            OrderError::Cart(inner) => inner.class(),
            OrderError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
