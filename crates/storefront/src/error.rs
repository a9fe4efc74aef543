//! Error classes shared by every aggregate.
//!
//! Each per-actor error enum says which class it belongs to; the HTTP layer
//! turns the class into a status code. Messages of non-internal errors are
//! shown to users as-is.

/// Broad failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or incomplete input.
    Validation,
    NotFound,
    /// The request conflicts with current state (stock, status, duplicates).
    Conflict,
    /// The caller may not perform this operation.
    Unauthorized,
    /// Anything unexpected. Logged, never shown verbatim.
    Internal,
}

pub trait Classify: std::error::Error {
    fn class(&self) -> ErrorClass;
}

/// Implements `From<FrameworkError>` for an error enum with `NotFound(String)`
/// and `ActorCommunication(String)` variants. Typed entity errors are
/// recovered by downcasting.
macro_rules! from_framework_error {
    ($error:ty) => {
        impl From<entity_actor::FrameworkError> for $error {
            fn from(e: entity_actor::FrameworkError) -> Self {
                match e.downcast::<$error>() {
                    Ok(inner) => inner,
                    Err(entity_actor::FrameworkError::NotFound(id)) => <$error>::NotFound(id),
                    Err(other) => <$error>::ActorCommunication(other.to_string()),
                }
            }
        }
    };
}

pub(crate) use from_framework_error;
