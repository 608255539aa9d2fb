//! Application-level error type returned by handlers.
//!
//! Current-family endpoints answer with the `{"errorCode","errorMessage"}`
//! envelope; legacy endpoints wrap the same error in [`RawError`] and answer
//! with the bare message as plain text.

use aiot_api::error::codes;
use aiot_api::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::BackendError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, codes::NOT_FOUND),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, codes::INVALID_REQUEST),
            AppError::Conflict(_) => (StatusCode::CONFLICT, codes::CONFLICT),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, codes::UNAUTHORIZED),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ErrorResponse::new(code, self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(_) => AppError::NotFound(e.to_string()),
            BackendError::Conflict(msg) => AppError::Conflict(msg),
            BackendError::InvalidRequest(msg) => AppError::BadRequest(msg),
            BackendError::BadCredentials => AppError::Forbidden(e.to_string()),
        }
    }
}

/// [`AppError`] rendered the way the legacy endpoints do: plain text body.
#[derive(Debug)]
pub struct RawError(pub AppError);

impl IntoResponse for RawError {
    fn into_response(self) -> Response {
        let (status, _) = self.0.parts();
        (status, self.0.to_string()).into_response()
    }
}

impl From<AppError> for RawError {
    fn from(e: AppError) -> Self {
        RawError(e)
    }
}

impl From<BackendError> for RawError {
    fn from(e: BackendError) -> Self {
        RawError(e.into())
    }
}
