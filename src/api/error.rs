//! API error types with structured JSON responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{FieldViolation, RegistryError};
use crate::log_error_with_context;

/// Structured error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

/// API-level errors with HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, violations) = match self {
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                "Request body failed validation".to_string(),
                Some(violations),
            ),
            ApiError::InvalidParameter(detail) => {
                (StatusCode::BAD_REQUEST, "INVALID_PARAMETER", detail, None)
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail, None),
            ApiError::AlreadyExists(detail) => {
                (StatusCode::BAD_REQUEST, "ALREADY_EXISTS", detail, None)
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, None),
            ApiError::Internal(detail) => {
                log_error_with_context!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                violations,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(e) => ApiError::Validation(e.violations().to_vec()),
            RegistryError::InvalidParameter(msg) => ApiError::InvalidParameter(msg),
            RegistryError::NotFound(msg) => ApiError::NotFound(msg),
            RegistryError::AlreadyExists(msg) => ApiError::AlreadyExists(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ValidationError, ViolationRule};
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_validation_returns_422_with_violations() {
        let err: ApiError = RegistryError::Validation(ValidationError::new(vec![
            FieldViolation::missing("name"),
            FieldViolation::new("age", ViolationRule::OutOfRange, "age must be between 1 and 119"),
        ]))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        let violations = json["error"]["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0]["field"], "name");
        assert_eq!(violations[1]["rule"], "out_of_range");
    }

    #[tokio::test]
    async fn test_not_found_returns_404() {
        let err: ApiError = RegistryError::NotFound("Patient not found".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Patient not found");
        assert!(json["error"].get("violations").is_none());
    }

    #[tokio::test]
    async fn test_already_exists_returns_400() {
        let err: ApiError = RegistryError::AlreadyExists("patient already exists".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_invalid_parameter_returns_400() {
        let err: ApiError = RegistryError::InvalidParameter("Invalid order".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_storage_error_is_hidden() {
        let err: ApiError = RegistryError::Storage("/var/lib/patients.json: EACCES".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
