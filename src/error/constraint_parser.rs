use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Extracts structured (entity, field, value) information from the free-text
/// messages Postgres attaches to constraint errors, so that handlers can
/// return a precise `Duplicate` or `Validation` response instead of a
/// generic database error.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in Postgres DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into (entity, field, value).
    ///
    /// Prefers the constraint name (e.g. `users_email_key` -> users/email)
    /// and falls back to the `Key (x)=(y)` detail in the message.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name
            && let Some((entity, field)) = Self::parse_constraint_name(constraint)
        {
            let value = Self::extract_value(message)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        if let Some((field, value)) = Self::extract_key_value(message) {
            let entity =
                Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a not-null constraint violation into (entity, field).
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::extract_column(message)?;
        let entity = Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into (entity, field, value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (field, value) = Self::extract_key_value(message)?;
        let entity = constraint_name
            .and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
            .or_else(|| Self::extract_table(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Splits Postgres-convention constraint names like `users_email_key`
    /// or `items_owner_id_fkey` into (singular-ish entity, field).
    fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let trimmed = constraint
            .strip_suffix("_key")
            .or_else(|| constraint.strip_suffix("_fkey"))
            .or_else(|| constraint.strip_suffix("_unique"))?;

        let (table, field) = trimmed.split_once('_')?;
        if table.is_empty() || field.is_empty() {
            return None;
        }
        Some((table.to_string(), field.to_string()))
    }

    fn extract_key_value(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(message)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    fn extract_value(message: &str) -> Option<String> {
        Self::extract_key_value(message).map(|(_, value)| value)
    }

    fn extract_column(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }

    fn extract_table(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_from_constraint_name() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\n\
                       DETAIL: Key (email)=(test@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "test@example.com".to_string()
            ))
        );
    }

    #[test]
    fn unique_violation_without_detail_uses_placeholder_value() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"";
        let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "duplicate_value".to_string()
            ))
        );
    }

    #[test]
    fn unique_violation_falls_back_to_message() {
        let message = "duplicate key value\nDETAIL: Key (email)=(a@x.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "a@x.com".to_string()
            ))
        );
    }

    #[test]
    fn not_null_violation_extracts_column() {
        let message = "null value in column \"email\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message);
        assert_eq!(result, Some(("resource".to_string(), "email".to_string())));
    }

    #[test]
    fn foreign_key_violation_extracts_reference() {
        let message = "insert or update on table \"items\" violates foreign key constraint \
                       \"items_owner_id_fkey\"\n\
                       DETAIL: Key (owner_id)=(4cb106fc-54bc-4cd8-8157-ad13501a2586) is not present in table \"users\".";
        let result =
            ConstraintParser::parse_foreign_key_violation(message, Some("items_owner_id_fkey"));
        let (entity, field, value) = result.expect("should parse");
        assert_eq!(entity, "items");
        assert_eq!(field, "owner_id");
        assert_eq!(value, "4cb106fc-54bc-4cd8-8157-ad13501a2586");
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("something went wrong", None),
            None
        );
        assert_eq!(ConstraintParser::parse_not_null_violation("nope"), None);
    }
}
