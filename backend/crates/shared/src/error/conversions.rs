//! Error conversions - From implementations for common error types
//!
//! Conversions into [`AppError`] plus its HTTP rendering.

use super::app_error::AppError;
use super::store::StoreError;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid id").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("Invalid JSON body: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// Store conversions
// ============================================================================

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::not_found("Record not found"),
            StoreError::Conflict(_) => AppError::conflict("Record already exists").with_source(err),
            StoreError::Unavailable(_) => {
                AppError::service_unavailable("Database unavailable").with_source(err)
            }
            StoreError::Internal(_) => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_err: Result<i32, _> = "abc".parse();
        let app_err: AppError = parse_err.unwrap_err().into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_store_error_conversion() {
        let cases = [
            (StoreError::NotFound, ErrorKind::NotFound),
            (StoreError::Conflict("k".into()), ErrorKind::Conflict),
            (StoreError::Unavailable("down".into()), ErrorKind::ServiceUnavailable),
            (StoreError::Internal("bad".into()), ErrorKind::InternalServerError),
        ];
        for (store_err, kind) in cases {
            let app_err: AppError = store_err.into();
            assert_eq!(app_err.kind(), kind);
        }
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_renders_error_body() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::forbidden("Forbidden: requires one of admin").into_response();
        assert_eq!(response.status(), 403);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Forbidden: requires one of admin" }));
    }
}
