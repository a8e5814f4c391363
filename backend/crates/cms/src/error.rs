//! CMS Error Types
//!
//! CMS-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::StoreError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::ServiceError;

/// CMS-specific result type alias
pub type CmsResult<T> = Result<T, CmsError>;

#[derive(Debug, Error)]
pub enum CmsError {
    /// Missing session or insufficient role
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Path id is not a number
    #[error("Invalid id")]
    InvalidId,

    /// Addressed record does not exist; carries the client message
    #[error("{0}")]
    NotFound(&'static str),

    /// Malformed or incomplete request input
    #[error("{0}")]
    Validation(String),

    /// Unique title already used; reported as a bad request
    #[error("{0}")]
    DuplicateTitle(&'static str),

    #[error("This email is already subscribed")]
    AlreadySubscribed,

    /// Upstream PDF host failed; its status is passed through when known
    #[error("Failed to fetch PDF file")]
    Upstream { status: Option<u16> },

    #[error("Blob storage error: {0}")]
    Storage(ServiceError),

    #[error("Mail error: {0}")]
    Mail(ServiceError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CmsError {
    pub fn validation(message: impl Into<String>) -> Self {
        CmsError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        if let CmsError::Upstream { status: Some(code) } = self {
            if let Ok(status) = StatusCode::from_u16(*code) {
                if status.is_client_error() || status.is_server_error() {
                    return status;
                }
            }
        }
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CmsError::Auth(e) => e.kind(),
            CmsError::InvalidId | CmsError::Validation(_) | CmsError::DuplicateTitle(_) => {
                ErrorKind::BadRequest
            }
            CmsError::NotFound(_) | CmsError::Store(StoreError::NotFound) => ErrorKind::NotFound,
            CmsError::AlreadySubscribed | CmsError::Store(StoreError::Conflict(_)) => {
                ErrorKind::Conflict
            }
            CmsError::Upstream { .. } | CmsError::Storage(_) => ErrorKind::BadGateway,
            CmsError::Store(StoreError::Unavailable(_)) => ErrorKind::ServiceUnavailable,
            CmsError::Mail(_) | CmsError::Store(StoreError::Internal(_)) | CmsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side details stay out of the message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            CmsError::Auth(e) => e.to_app_error(),
            CmsError::Store(StoreError::NotFound) => AppError::not_found("Record not found"),
            CmsError::Store(StoreError::Conflict(_)) => AppError::conflict("Record already exists"),
            CmsError::Store(_) | CmsError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            CmsError::Storage(_) => AppError::bad_gateway("File storage request failed"),
            CmsError::Mail(_) => AppError::internal("Failed to send email"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CmsError::Store(e) if !matches!(e, StoreError::NotFound) => {
                tracing::error!(error = %e, "CMS store error");
            }
            CmsError::Storage(e) => {
                tracing::error!(error = %e, "Blob storage error");
            }
            CmsError::Mail(e) => {
                tracing::error!(error = %e, "Mail delivery error");
            }
            CmsError::Upstream { status } => {
                tracing::warn!(status = ?status, "PDF upstream fetch failed");
            }
            CmsError::Internal(msg) => {
                tracing::error!(message = %msg, "CMS internal error");
            }
            CmsError::Auth(_) => {}
            _ => {
                tracing::debug!(error = %self, "CMS error");
            }
        }
    }
}

impl From<CmsError> for AppError {
    fn from(err: CmsError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        match self {
            CmsError::Auth(e) => e.into_response(),
            other => {
                other.log();
                let status = other.status_code();
                let mut response = other.to_app_error().into_response();
                *response.status_mut() = status;
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_title_is_bad_request() {
        let err = CmsError::DuplicateTitle("Album with this title already exists");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_app_error().message(),
            "Album with this title already exists"
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = CmsError::Upstream { status: Some(404) };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_app_error().message(), "Failed to fetch PDF file");

        let err = CmsError::Upstream { status: Some(200) };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = CmsError::Upstream { status: None };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_auth_errors_keep_their_status() {
        let err = CmsError::from(AuthError::forbidden(&["admin", "editor"]));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_app_error().message(), "Forbidden: requires one of admin, editor");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = CmsError::Mail(ServiceError::Transport("535 auth failed for user x".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_app_error().message(), "Failed to send email");
    }
}
