//! # Framework Errors
//!
//! Errors produced by the runtime itself, plus the boxed entity error that
//! carries an aggregate's own failure back to the caller.

use std::error::Error;

/// Errors that can occur within the actor runtime.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers a typed entity error.
    ///
    /// Returns `Err(self)` unchanged when this is not an `EntityError`, or when
    /// the boxed error is of a different type.
    pub fn downcast<E: Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_keeps_foreign_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.downcast::<OutOfStock>().unwrap_err();
        assert!(back.to_string().contains("disk"));

        let closed = FrameworkError::ActorClosed.downcast::<OutOfStock>().unwrap_err();
        assert!(matches!(closed, FrameworkError::ActorClosed));
    }
}
