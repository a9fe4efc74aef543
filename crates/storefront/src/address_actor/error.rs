use crate::error::{from_framework_error, Classify, ErrorClass};
use crate::model::AddressId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    #[error("Address book not found: {0}")]
    NotFound(String),

    #[error("Address {0} not found")]
    EntryNotFound(AddressId),

    #[error("Please fill in: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(AddressError);

impl Classify for AddressError {
    fn class(&self) -> ErrorClass {
        match self {
            AddressError::NotFound(_) | AddressError::EntryNotFound(_) => ErrorClass::NotFound,
            AddressError::Incomplete(_) => ErrorClass::Validation,
            AddressError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
