//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cardwise_core::CardwiseError;
use serde_json::json;

/// Errors surfaced to HTTP clients as `{"detail": "..."}` bodies.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<CardwiseError> for ApiError {
    fn from(err: CardwiseError) -> Self {
        match err {
            CardwiseError::SessionNotFound(id) => {
                tracing::debug!(session_id = %id, "unknown session");
                // fixed detail string, the id is not echoed back
                ApiError::NotFound("Session not found".to_string())
            }
            CardwiseError::InvalidRequest(detail) => ApiError::BadRequest(detail),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
