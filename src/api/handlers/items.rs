//! Item CRUD handlers.
//!
//! Regular users see and touch only their own items; superusers see
//! everything. Ownership checks live in the service layer, the read
//! scoping lives here.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::ITEM_TAG;
use crate::api::dto::{
    CreateItemRequest, ItemResponse, Paginated, PaginationParams, UpdateItemRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::can_modify;
use crate::state::AppState;
use crate::utils::validate::validate_payload;

/// Creates the item routes
///
/// # Routes
/// - `GET /` - List items (own items, or all for superusers)
/// - `POST /` - Create an item owned by the caller
/// - `GET /{id}` - Get item by id (owner or superuser)
/// - `PATCH /{id}` - Update item by id (owner or superuser)
/// - `DELETE /{id}` - Delete item by id (owner or superuser)
///
/// # Authentication
/// All routes require JWT authentication via the auth_middleware
pub fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_items, create_item))
        .routes(routes!(get_item, update_item, delete_item))
}

/// GET /api/items - List items
///
/// A superuser sees every item with the global count; anyone else sees
/// their own items with their own count.
#[utoipa::path(
    get,
    path = "/",
    tag = ITEM_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of items", body = Paginated<ItemResponse>),
        (status = 401, description = "Unauthorized - invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_items(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ItemResponse>>> {
    validate_payload(&params)?;

    let (items, total) = if auth_user.0.is_superuser {
        state.services.items.list(params.skip, params.limit).await?
    } else {
        state
            .services
            .items
            .list_by_owner(auth_user.0.id, params.skip, params.limit)
            .await?
    };
    let data: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();

    Ok(Json(Paginated::new(data, total, &params)))
}

/// POST /api/items - Create an item
///
/// The caller becomes the owner; ownership cannot be assigned.
#[utoipa::path(
    post,
    path = "/",
    tag = ITEM_TAG,
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request data"),
        (status = 401, description = "Unauthorized - invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    validate_payload(&payload)?;

    let item = state.services.items.create(payload, auth_user.0.id).await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// GET /api/items/{id} - Get item by id
///
/// Readable by the owner or a superuser; anyone else gets 403 even
/// though the item exists.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ITEM_TAG,
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemResponse>> {
    let item = state.services.items.get(id).await?;

    if !can_modify(&item, &auth_user.0) {
        return Err(AppError::Forbidden {
            message: "Not allowed to view this item".to_string(),
        });
    }

    Ok(Json(ItemResponse::from(item)))
}

/// PATCH /api/items/{id} - Update item by id
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = ITEM_TAG,
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    validate_payload(&payload)?;

    let item = state
        .services
        .items
        .update(id, payload, &auth_user.0)
        .await?;

    Ok(Json(ItemResponse::from(item)))
}

/// DELETE /api/items/{id} - Delete item by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ITEM_TAG,
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.items.delete(id, &auth_user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
