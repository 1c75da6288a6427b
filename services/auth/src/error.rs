//! Error type for authentication and authorization failures

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lunch_common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing, malformed, expired, wrong-type or revoked token
    #[error("{0}")]
    Unauthorized(String),

    /// Token is valid but lacks the required group
    #[error("{0}")]
    Forbidden(String),

    /// Malformed or incomplete request body
    #[error("{0}")]
    BadRequest(String),

    /// Unknown account, credential mismatch or email already in use
    #[error("{0}")]
    NotFound(String),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Database error
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Database(e) if e.is_unique_violation() => StatusCode::CONFLICT,
            AuthError::Token(_) | AuthError::Hashing(_) | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
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
