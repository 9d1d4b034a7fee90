//! Error handler for converting AppError to HTTP responses.
//!
//! Implements IntoResponse for AppError with a fixed status mapping.
//! Infrastructure variants carry a `source` that stays in the logs;
//! the response body only ever exposes the structured context fields.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        // Server-side failures are logged with their source chain before
        // the sanitized body goes out.
        if status.is_server_error() {
            error!(error = %self, source = ?std::error::Error::source(&self), "Request failed");
        }

        let error_response = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found_error(entity, field, value),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => ErrorResponse::duplicate_error(entity, field, value),
            AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::UnprocessableContent { message } => {
                ErrorResponse::new("UNPROCESSABLE_CONTENT", message)
            }
            AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
            AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message),
            AppError::Database { operation, .. } => ErrorResponse::new(
                "DATABASE_ERROR",
                &format!("Database operation failed: {}", operation),
            )
            .with_details(json!({ "operation": operation })),
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key))
                    .with_details(json!({ "key": key }))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UnprocessableContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("user", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::duplicate_email("a@x.com")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&AppError::Validation {
                field: "email".to_string(),
                reason: "bad".to_string(),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::Unauthorized {
                message: "no".to_string(),
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_to_status_code(&AppError::Forbidden {
                message: "no".to_string(),
            }),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn infrastructure_errors_map_to_server_statuses() {
        assert_eq!(
            error_to_status_code(&AppError::Database {
                operation: "insert user".to_string(),
                source: anyhow::anyhow!("boom"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&AppError::ConnectionPool {
                source: anyhow::anyhow!("pool exhausted"),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_to_status_code(&AppError::Internal {
                source: anyhow::anyhow!("boom"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_response_hides_source() {
        let response = AppError::Internal {
            source: anyhow::anyhow!("secret connection string"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
