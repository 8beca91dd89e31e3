//! Error types for cm-api

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// cm-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Contact with id={0} not found")]
    NotFound(u64),

    #[error("Contact with id={0} already exists")]
    Conflict(u64),

    #[error("Request id {path} does not match contact id {body}")]
    IdMismatch { path: u64, body: u64 },

    #[error("Contact id space exhausted")]
    IdsExhausted,

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error("Core error: {0}")]
    Core(#[from] cm_core::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::Path(rejection) => rejection.status(),
            ApiError::Json(rejection) => rejection.status(),
            ApiError::IdsExhausted | ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match &self {
            ApiError::Path(rejection) => rejection.body_text(),
            ApiError::Json(rejection) => rejection.body_text(),
            _ => self.to_string(),
        };
        tracing::debug!("Request failed with {}: {}", status, error);
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
