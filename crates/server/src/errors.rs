use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::types::ErrorBody;
use service::admin::AdminAuthError;
use service::errors::ServiceError;

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const INVALID_BODY: &str = "Invalid request body";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// JSON `{error}` response with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }

    pub fn invalid_body() -> Self { Self::bad_request(INVALID_BODY) }

    /// Map a service failure; storage errors are logged and replaced by
    /// `internal_message`.
    pub fn from_service(err: ServiceError, internal_message: &str) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Db(detail) => {
                error!(error = %detail, "storage_failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self { Self::from_service(err, INTERNAL_ERROR) }
}

impl From<AdminAuthError> for ApiError {
    fn from(err: AdminAuthError) -> Self {
        let status = match err {
            AdminAuthError::PasswordRequired => StatusCode::BAD_REQUEST,
            AdminAuthError::InvalidPassword | AdminAuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
