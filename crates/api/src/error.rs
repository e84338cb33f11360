//! API error types with HTTP response mapping.

use application::ApplicationError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{CustomerError, ProductError, RepositoryError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Use case failure.
    Application(ApplicationError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Application(err) => application_error_to_response(err),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "status": "error", "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn application_error_to_response(err: ApplicationError) -> (StatusCode, String) {
    let status = match &err {
        ApplicationError::ProductNotFound | ApplicationError::CustomerNotFound => {
            StatusCode::NOT_FOUND
        }
        ApplicationError::DuplicateSku { .. } | ApplicationError::DuplicateEmail => {
            StatusCode::CONFLICT
        }
        ApplicationError::InvalidPriceRange { .. } => StatusCode::BAD_REQUEST,
        ApplicationError::Product(ProductError::InsufficientStock { .. }) => StatusCode::CONFLICT,
        ApplicationError::Product(_) => StatusCode::BAD_REQUEST,
        ApplicationError::Customer(CustomerError::PasswordHash(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ApplicationError::Customer(_) => StatusCode::BAD_REQUEST,
        ApplicationError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ApplicationError::Repository(RepositoryError::Backend(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
