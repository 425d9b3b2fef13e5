//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every failure serializes as `{"message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, ItemError, UploadError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Item operation failed.
    #[error("Item error: {0}")]
    Item(#[from] ItemError),

    /// Image upload failed.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON failure body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Upload(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::MissingField(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::AccountExists => StatusCode::CONFLICT,
                AuthError::AccountNotFound => StatusCode::NOT_FOUND,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Item(err) => match err {
                ItemError::MissingField(_)
                | ItemError::InvalidType(_)
                | ItemError::AlreadyReturned => StatusCode::BAD_REQUEST,
                ItemError::Unauthenticated | ItemError::UnknownOwner => StatusCode::UNAUTHORIZED,
                ItemError::NotOwner => StatusCode::FORBIDDEN,
                ItemError::NotFound => StatusCode::NOT_FOUND,
                ItemError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Internal details never leak here.
    fn message(&self) -> String {
        match self {
            Self::Database(_)
            | Self::Upload(_)
            | Self::Internal(_)
            | Self::Auth(AuthError::PasswordHash | AuthError::Repository(_))
            | Self::Item(ItemError::Repository(_)) => "internal server error".to_owned(),
            Self::Auth(err) => err.to_string(),
            Self::Item(err) => err.to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("item 123".to_string());
        assert_eq!(err.to_string(), "Not found: item 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            get_status(AuthError::MissingField("name").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AuthError::AccountExists.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AuthError::AccountNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AuthError::PasswordHash.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_item_error_status_codes() {
        assert_eq!(
            get_status(ItemError::MissingField("date").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ItemError::Unauthenticated.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ItemError::NotOwner.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(ItemError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ItemError::AlreadyReturned.into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.message(), "internal server error");
    }
}
