use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use todos_core::api::ApiResponse;
use todos_core::storage::{repository_error_to_status_code, RepositoryError};
use todos_core::todo::TodoError;

/// Errors surfaced by the API handlers.
///
/// Every variant renders as the `{code, data, message}` envelope with `code`
/// equal to the HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    /// The `{id}` path segment is not a positive integer.
    #[error("invalid id")]
    InvalidId,
    /// The request body could not be parsed.
    #[error("{0}")]
    BadRequest(String),
    /// No route matches the request path.
    #[error("not found")]
    RouteNotFound,
    /// The path exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    Validation(#[from] TodoError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId | AppError::BadRequest(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Repository(repo_error) => {
                let code = repository_error_to_status_code(repo_error);
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Application error");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        (
            status,
            Json(ApiResponse::<()>::error(status.as_u16(), message)),
        )
            .into_response()
    }
}

/// Router fallback for paths with no route.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
