//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Attaches structured details to the error response.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Error response for a missing resource.
    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {}={} not found", entity, field, value),
        )
        .with_details(serde_json::json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    /// Error response for a unique constraint collision.
    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{}.{} = '{}' already exists", entity, field, value),
        )
        .with_details(serde_json::json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    /// Error response for a failed field validation.
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new(
            "VALIDATION_ERROR",
            &format!("Validation failed for {}: {}", field, reason),
        )
        .with_details(serde_json::json!({
            "field": field,
            "reason": reason,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn validation_error_carries_field_details() {
        let json = serde_json::to_value(ErrorResponse::validation_error("email", "bad")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["field"], "email");
    }
}
