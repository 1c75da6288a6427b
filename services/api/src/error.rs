//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lunch_auth::AuthError;
use lunch_common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource
    #[error("{0}")]
    NotFound(String),

    /// Caller may not touch another employee's record; answered as 404
    #[error("{0}")]
    NotAllowed(String),

    /// Non-admin deleting someone else's account; answered as 405
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Token or credential failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::NotAllowed(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Auth(e) => e.status(),
            ApiError::Database(e) if e.is_unique_violation() => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            json!({
                "message": "Something went wrong",
                "error": self.to_string(),
            })
        } else {
            json!({ "message": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
