//! # API error mapping
//!
//! Maps handler failures to HTTP status codes and a JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API layer error
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unexpected server-side failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                // details stay in the log
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiErrorResponse::from_msg(message))).into_response()
    }
}
