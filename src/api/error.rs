//! API error types with field-keyed JSON responses.
//!
//! Every non-200 response carries `{ "errors": { field: message } }` so a
//! front end can render the same way for local and server validation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::validation::FieldErrors;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: FieldErrors,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, FieldErrors::general(detail))
            }
        };

        (status, Json(ErrorBody { errors })).into_response()
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::validation::{Field, NAME_REQUIRED};

    #[tokio::test]
    async fn validation_returns_400_with_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Name, NAME_REQUIRED);
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"]["name"], NAME_REQUIRED);
    }

    #[tokio::test]
    async fn bad_request_uses_general_key() {
        let response = ApiError::BadRequest("Body is not JSON".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"]["general"], "Body is not JSON");
    }
}
