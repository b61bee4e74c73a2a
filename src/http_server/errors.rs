//! # HTTP API Errors
//!
//! Maps validation and lookup failures onto status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::FieldErrors;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// One or more fields failed the schema. Body is the field -> message map.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Referenced id is not in the store. Carries the resource's message.
    #[error("{0}")]
    NotFound(String),

    /// Request body could not be decoded
    #[error("{0}")]
    MalformedBody(String),

    /// Store failure that no request can cause
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                let body = Json(ErrorResponse {
                    error: other.to_string(),
                });
                (status, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("User ID not found.".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MalformedBody("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message_is_verbatim() {
        let err = ApiError::NotFound("Car ID not found.".into());
        assert_eq!(err.to_string(), "Car ID not found.");
    }
}
