//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` / `item` - entity request/response DTOs
//! - `auth` - login and token DTOs
//! - `pagination` - skip/limit parameters and the list envelope
//! - `error` - common error response DTOs

mod auth;
mod error;
mod item;
mod pagination;
mod user;

pub use auth::{LoginRequest, TokenResponse};
pub use error::ErrorResponse;
pub use item::{CreateItemRequest, ItemResponse, UpdateItemRequest};
pub use pagination::{Paginated, PaginationParams};
pub use user::{
    CreateUserRequest, RegisterRequest, UpdateMeRequest, UpdatePasswordRequest, UpdateUserRequest,
    UserResponse,
};
