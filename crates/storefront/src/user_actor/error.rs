use crate::error::{from_framework_error, Classify, ErrorClass};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

from_framework_error!(UserError);

impl Classify for UserError {
    fn class(&self) -> ErrorClass {
        match self {
            UserError::NotFound(_) => ErrorClass::NotFound,
            UserError::Validation(_) => ErrorClass::Validation,
            UserError::EmailTaken(_) => ErrorClass::Conflict,
            UserError::ActorCommunication(_) => ErrorClass::Internal,
        }
    }
}
