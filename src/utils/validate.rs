use validator::Validate;

use crate::error::{AppError, AppResult};

/// Runs `validator` checks on a request payload and converts the first
/// failure into a structured `Validation` error.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let (field, field_errors) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| (field.to_string(), errs.to_vec()))
            .unwrap_or_else(|| ("payload".to_string(), Vec::new()));

        let reason = field_errors
            .first()
            .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid value".to_string());

        AppError::Validation { field, reason }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Too short"))]
        name: String,
    }

    #[test]
    fn valid_payload_passes() {
        let sample = Sample {
            name: "abc".to_string(),
        };
        assert!(validate_payload(&sample).is_ok());
    }

    #[test]
    fn invalid_payload_reports_field_and_message() {
        let sample = Sample {
            name: "ab".to_string(),
        };
        match validate_payload(&sample) {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "name");
                assert_eq!(reason, "Too short");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
