//! Current user (me) endpoints.
//!
//! Endpoints for the authenticated user to read and change their own
//! account. The profile update path deliberately cannot touch the
//! active or superuser flags.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{UpdateMeRequest, UpdatePasswordRequest, UpdateUserRequest, UserResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::validate_payload;

/// Creates the "me" routes (current authenticated user)
///
/// # Routes
/// - `GET /` - Get current user's profile
/// - `PATCH /` - Update current user's profile
/// - `PUT /password` - Change current user's password
///
/// # Authentication
/// All routes require JWT authentication via the auth_middleware
pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_me, update_me))
        .routes(routes!(update_my_password))
}

/// GET /api/me - Get current user information
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user information", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_me(Extension(auth_user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse::from(auth_user.0))
}

/// PATCH /api/me - Update current user's profile
///
/// Only email and full name are mutable here; flags and password have
/// their own paths.
#[utoipa::path(
    patch,
    path = "/",
    tag = USER_TAG,
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 409, description = "Email already in use")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateMeRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_payload(&payload)?;

    let changes = UpdateUserRequest {
        email: payload.email,
        full_name: payload.full_name,
        ..Default::default()
    };
    let user = state.services.users.update(auth_user.0.id, changes).await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/me/password - Change current user's password
///
/// Requires proof of the current password.
#[utoipa::path(
    put,
    path = "/password",
    tag = USER_TAG,
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = UserResponse),
        (status = 401, description = "Current password is incorrect")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_my_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_payload(&payload)?;

    let user = state
        .services
        .users
        .update_password(auth_user.0.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
