//! Error types for taxai-api

use crate::classifier::ClassifierError;
use crate::image::ImageError;
use crate::taxon::TaxonError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Inference backend or taxonomy API failed (503)
    #[error("Upstream service unavailable: {0}")]
    Upstream(String),

    /// taxai-common error
    #[error("Common error: {0}")]
    Common(#[from] taxai_common::Error),
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<TaxonError> for ApiError {
    fn from(err: TaxonError) -> Self {
        match err {
            TaxonError::InvalidName => ApiError::BadRequest(err.to_string()),
            TaxonError::NotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Upstream(msg) => (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_ERROR", msg),
            ApiError::Common(err) => {
                let (status, code) = match &err {
                    taxai_common::Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR"),
                };
                (status, code, err.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Upstream("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (
                ApiError::Common(taxai_common::Error::InvalidInput("empty".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Common(taxai_common::Error::Config("bad".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_taxon_error_mapping() {
        assert!(matches!(
            ApiError::from(TaxonError::InvalidName),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(TaxonError::NotFound("Foo bar".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(TaxonError::Forbidden),
            ApiError::Upstream(_)
        ));
    }

    #[test]
    fn test_classifier_error_is_upstream() {
        let err = ApiError::from(ClassifierError::NetworkError("connection refused".into()));
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
