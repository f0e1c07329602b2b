use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error};
use utoipa::ToSchema;

use marquee_core::CatalogError;
use marquee_model::PageError;

pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub status: u16,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.message,
                status: self.status.as_u16(),
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Backend details stay in the logs; clients only see the status class.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => {
                debug!(%msg, "catalog lookup found nothing");
                Self::not_found(msg)
            }
            CatalogError::Unavailable { .. } => {
                error!(error = %err, "catalog backend unavailable");
                Self::unavailable("Service temporarily unavailable")
            }
            _ => {
                error!(error = %err, "catalog request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        Self::unprocessable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_message() {
        let err = AppError::from(CatalogError::NotFound("movies: no document".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "movies: no document");
    }

    #[test]
    fn exhausted_retries_map_to_service_unavailable() {
        let err = AppError::from(CatalogError::Unavailable {
            operation: "document search".into(),
            attempts: 8,
            message: "connection refused".into(),
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.message.contains("connection refused"));
    }

    #[test]
    fn backend_failures_are_generic() {
        let err = AppError::from(CatalogError::Backend("shard failure on node-3".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn page_errors_are_unprocessable() {
        let err = AppError::from(PageError::NumberOutOfRange(0));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
