//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, logging_middleware, request_id_middleware, superuser_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first), so request_id runs before logging, and per-nest auth layers run
/// before the handlers they guard.
///
/// # Routes
/// - `/api/auth` - Login and registration (public)
/// - `/api/me` - Current user endpoints (authenticated)
/// - `/api/users` - User administration (superuser only)
/// - `/api/items` - Item CRUD (authenticated)
/// - `/health` - Health and probe endpoints (public)
/// - `/swagger-ui` - Interactive API documentation
/// - `/api-docs/openapi.json` - OpenAPI specification
pub fn create_router(state: AppState) -> Router {
    let me_routes = handlers::me::me_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let item_routes = handlers::items::item_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    // Superuser gate runs after authentication resolved the caller.
    let user_routes = handlers::users::user_routes()
        .layer(middleware::from_fn(superuser_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/auth", handlers::auth::auth_routes())
        .nest("/api/me", me_routes)
        .nest("/api/users", user_routes)
        .nest("/api/items", item_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
