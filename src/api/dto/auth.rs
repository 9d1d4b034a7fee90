//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com", format = "email")]
    pub email: String,
    /// User's password (plain text)
    #[validate(length(min = 8, max = 40, message = "Password must be between 8 and 40 characters"))]
    #[schema(example = "password123", format = "password", min_length = 8, max_length = 40)]
    pub password: String,
}

/// Bearer token envelope returned on successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Access token
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// Always "bearer"
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn login_request_is_validated() {
        let req = LoginRequest {
            email: "user@example.com".to_string(),
            password: "password1".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = LoginRequest {
            email: "bad".to_string(),
            password: "password1".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn token_envelope_is_bearer() {
        let token = TokenResponse::bearer("abc".to_string());
        assert_eq!(token.token_type, "bearer");

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
