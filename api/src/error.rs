//! API errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors surfaced to API clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// Full name, email or company name absent or blank
    #[error("Missing required fields")]
    MissingRequiredFields,

    /// Body was not a decodable inquiry
    #[error("Invalid request body")]
    InvalidBody,

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingRequiredFields | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref reason) = self {
            tracing::error!(%reason, "inquiry handling failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
