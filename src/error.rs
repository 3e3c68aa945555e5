use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, rawg::RawgError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend could not be read or written.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// External metadata API failed.
    #[error("game metadata lookup failed")]
    Upstream(#[source] RawgError),
    /// Invalid input provided by the client.
    #[error("{0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// Resource already exists.
    #[error("{0}")]
    Conflict(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => ServiceError::NotFound("Game not found".into()),
            StorageError::Conflict { .. } => ServiceError::Conflict(
                "Game with this ID already exists. Use PUT to update.".into(),
            ),
            StorageError::InvalidRecord { source, .. } => {
                ServiceError::InvalidInput(format!("invalid game fields: {source}"))
            }
            err @ StorageError::Unavailable { .. } => ServiceError::Unavailable(err),
        }
    }
}

impl From<RawgError> for ServiceError {
    fn from(err: RawgError) -> Self {
        ServiceError::Upstream(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
            .collect();
        messages.sort();
        messages.dedup();

        if messages.is_empty() {
            AppError::BadRequest(format!("validation failed: {err}"))
        } else {
            AppError::BadRequest(messages.join("; "))
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("{0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("{0}")]
    Conflict(String),
    /// An upstream dependency answered badly.
    #[error("bad gateway: {0}")]
    BadGateway(String),
    /// Service unavailable or not configured.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error; the detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::Internal(report(&source)),
            ServiceError::Upstream(RawgError::NotFound { path }) => {
                AppError::NotFound(format!("game metadata `{path}` not found"))
            }
            ServiceError::Upstream(RawgError::NotConfigured(reason)) => {
                AppError::ServiceUnavailable(format!("game metadata API: {reason}"))
            }
            ServiceError::Upstream(source) => AppError::BadGateway(report(&source)),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Conflict(message) => AppError::Conflict(message),
        }
    }
}

/// Render an error together with its source chain.
fn report(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            AppError::Internal(detail) => {
                error!(error = %detail, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_http_statuses() {
        let cases = [
            (StorageError::not_found("1"), StatusCode::NOT_FOUND),
            (StorageError::conflict("1"), StatusCode::CONFLICT),
            (
                StorageError::unavailable("disk".into(), std::io::Error::other("full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError::from(ServiceError::from(err)).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn upstream_errors_map_to_http_statuses() {
        let cases = [
            (
                RawgError::NotFound {
                    path: "games/1".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                RawgError::NotConfigured("missing API key"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (RawgError::RateLimited, StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            let response = AppError::from(ServiceError::from(err)).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
