//! Item-related DTOs for API requests and responses.

use crate::models::Item;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating an item. The owner is the acting user, never
/// part of the payload.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255)]
    pub title: String,
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Request body for updating an item. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Public view of an item.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            owner_id: item.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn title_boundaries() {
        let make = |title: &str| CreateItemRequest {
            title: title.to_string(),
            description: None,
        };
        assert!(make("").validate().is_err());
        assert!(make("t").validate().is_ok());
        assert!(make(&"t".repeat(255)).validate().is_ok());
        assert!(make(&"t".repeat(256)).validate().is_err());
    }

    #[test]
    fn description_is_optional_but_bounded() {
        let req = CreateItemRequest {
            title: "t".to_string(),
            description: Some("d".repeat(256)),
        };
        assert!(req.validate().is_err());

        let req = CreateItemRequest {
            title: "t".to_string(),
            description: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn partial_update_with_no_fields_is_valid() {
        assert!(UpdateItemRequest::default().validate().is_ok());
    }
}
