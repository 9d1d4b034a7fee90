//! User administration handlers.
//!
//! All routes here sit behind the superuser gate; regular users manage
//! themselves through the `/api/me` endpoints instead.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, Paginated, PaginationParams, UpdateUserRequest, UserResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::validate_payload;

/// Creates the user administration routes
///
/// # Routes
/// - `GET /` - List users (paginated)
/// - `POST /` - Create a user with explicit flags
/// - `GET /{id}` - Get user by id
/// - `PATCH /{id}` - Update user by id
/// - `DELETE /{id}` - Delete user by id
///
/// # Authentication
/// All routes require a superuser token.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
}

/// GET /api/users - List users
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of users", body = Paginated<UserResponse>),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Superuser privileges required")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    validate_payload(&params)?;

    let (users, total) = state.services.users.list(params.skip, params.limit).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(Paginated::new(data, total, &params)))
}

/// POST /api/users - Create a user
///
/// Admin creation path: the request may set the active and superuser
/// flags directly.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request data"),
        (status = 403, description = "Superuser privileges required"),
        (status = 409, description = "Email already registered")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_payload(&payload)?;

    let user = state.services.users.create(payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/{id} - Get user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Superuser privileges required"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/users/{id} - Update user by id
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Superuser privileges required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_payload(&payload)?;

    let user = state.services.users.update(id, payload).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/users/{id} - Delete user by id
///
/// Owned items are removed with the user.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Superuser privileges required"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
