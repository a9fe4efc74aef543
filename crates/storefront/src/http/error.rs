//! The `{success: false, message}` error envelope.
use crate::error::{Classify, ErrorClass};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Shown in place of anything unexpected; details go to the log.
pub const GENERIC_FAILURE: &str = "Some error occurred!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// No usable principal on the request.
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Please sign in to continue")
    }

    /// A known principal asking for something it may not do.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }
}

pub(crate) fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Validation => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::Unauthorized => StatusCode::FORBIDDEN,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<E: Classify> From<E> for ApiError {
    fn from(e: E) -> Self {
        match e.class() {
            ErrorClass::Internal => {
                error!(error = %e, "Request failed unexpectedly");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
            }
            class => Self::new(status_for(class), e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({"success": false, "message": self.message}));
        (self.status, body).into_response()
    }
}
