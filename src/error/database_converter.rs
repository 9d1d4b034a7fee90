use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations become `Duplicate`/`Validation` errors with the
/// entity and field parsed out of the Postgres message; everything else is
/// passed through as a `Database` error with its source intact.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_unique_violation(message, constraint_name) {
                    Some((entity, field, value)) => AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("Unique constraint violation: {}", message),
                    },
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                match ConstraintParser::parse_not_null_violation(message) {
                    Some((entity, field)) => AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    },
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("Not null constraint violation: {}", message),
                    },
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                match ConstraintParser::parse_foreign_key_violation(message, constraint_name) {
                    Some((entity, field, value)) => AppError::Validation {
                        field,
                        reason: format!("Invalid reference for {}: '{}'", entity, value),
                    },
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("Foreign key violation: {}", message),
                    },
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Database error: {}", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_diesel_errors_stay_database_errors() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "update user",
        );
        match err {
            AppError::Database { operation, .. } => assert_eq!(operation, "update user"),
            other => panic!("Expected Database, got {:?}", other),
        }
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "get");
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
