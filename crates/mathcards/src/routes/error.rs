//! Error responses for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mathcards_common::MathcardsError;
use serde::Serialize;
use thiserror::Error;

/// API error: a practice error on its way to becoming an HTTP response
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] MathcardsError);

/// Body that failed to deserialize (wrong type, missing field, bad JSON)
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(MathcardsError::InvalidInput(rejection.body_text()))
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.0.kind(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
