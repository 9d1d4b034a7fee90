//! User-related DTOs for API requests and responses.

use crate::models::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a user (admin operation).
///
/// Unlike registration, an admin may set the active and superuser flags.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"), length(max = 255, message = "Email must be at most 255 characters"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 40)]
    pub password: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[validate(length(max = 255, message = "Full name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

fn default_is_active() -> bool {
    true
}

/// Request body for self-registration.
///
/// Deliberately carries no flag fields: a registering user can never grant
/// themselves elevated privilege.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"), length(max = 255, message = "Email must be at most 255 characters"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 40)]
    pub password: String,
    #[validate(length(max = 255, message = "Full name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

/// Request body for updating a user (admin operation).
///
/// All fields optional; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"), length(max = 255, message = "Email must be at most 255 characters"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    #[validate(length(max = 255, message = "Full name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

/// Request body for the authenticated user updating their own profile.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateMeRequest {
    #[validate(email(message = "Invalid email format"), length(max = 255, message = "Email must be at most 255 characters"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Full name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

/// Request body for a password change.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    #[schema(format = "password")]
    pub current_password: String,
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    #[schema(format = "password")]
    pub new_password: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Public view of a user. The hashed credential and timestamps never leave
/// the service boundary.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            full_name: user.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            email: "user@example.com".to_string(),
            password: password.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn password_length_boundaries() {
        assert!(register("1234567").validate().is_err());
        assert!(register("12345678").validate().is_ok());
        assert!(register(&"x".repeat(40)).validate().is_ok());
        assert!(register(&"x".repeat(41)).validate().is_err());
    }

    #[test]
    fn email_format_is_checked() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "password1".to_string(),
            full_name: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_allows_all_absent() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn response_strips_credential() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            hashed_password: "$argon2id$...".to_string(),
            is_active: true,
            is_superuser: false,
            full_name: Some("A".to_string()),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        let response = UserResponse::from(user.clone());
        assert_eq!(response.id, user.id);
        assert_eq!(response.email, user.email);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert!(json.get("password").is_none());
    }
}
