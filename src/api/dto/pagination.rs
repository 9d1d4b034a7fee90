//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for skip/limit pagination.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct PaginationParams {
    /// Number of records to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "Skip must not be negative"))]
    #[param(minimum = 0, example = 0)]
    pub skip: i64,

    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    #[param(minimum = 1, maximum = 1000, example = 100)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Generic paginated list envelope.
///
/// `count` is the total number of matching rows, not the page size, so
/// clients can compute whether more pages exist.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub count: i64,
    pub skip: i64,
    pub limit: i64,
}

impl<T> Paginated<T> {
    /// Wraps one page of data with the totals for the query that produced it.
    pub fn new(data: Vec<T>, count: i64, params: &PaginationParams) -> Self {
        Self {
            data,
            count,
            skip: params.skip,
            limit: params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn defaults_are_skip_zero_limit_hundred() {
        let params = PaginationParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn negative_skip_and_oversized_limit_are_rejected() {
        let params = PaginationParams { skip: -1, limit: 10 };
        assert!(params.validate().is_err());

        let params = PaginationParams {
            skip: 0,
            limit: 1001,
        };
        assert!(params.validate().is_err());

        let params = PaginationParams { skip: 0, limit: 0 };
        assert!(params.validate().is_err());
    }

    #[test]
    fn envelope_reports_total_count_not_page_size() {
        let params = PaginationParams { skip: 10, limit: 5 };
        let page = Paginated::new(vec!["a", "b"], 42, &params);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.count, 42);
        assert_eq!(page.skip, 10);
        assert_eq!(page.limit, 5);
    }
}
