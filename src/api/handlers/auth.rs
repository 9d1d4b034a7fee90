//! Authentication handlers for login and registration.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::generate_access_token;
use crate::utils::validate::validate_payload;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /login` - Authenticate user and get an access token
/// - `POST /register` - Register a new account
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(register))
}

/// POST /api/auth/login - Authenticate user
///
/// Verifies email and password and returns a bearer access token.
/// Unknown email and wrong password produce the same 401 response.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is deactivated")
    )
)]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    validate_payload(&payload)?;

    let user = state
        .services
        .users
        .authenticate(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Incorrect email or password".to_string(),
        })?;

    if !user.is_active {
        return Err(AppError::Forbidden {
            message: "Account is deactivated".to_string(),
        });
    }

    let access_token = generate_access_token(
        user.id,
        &state.jwt_config.secret,
        state.jwt_config.access_token_expiration,
    )?;

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// POST /api/auth/register - Register a new account
///
/// Self-registration; the created account is always active and
/// non-privileged. Returns the profile, not a token: the client logs
/// in afterwards.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Email already registered")
    )
)]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_payload(&payload)?;

    let user = state.services.users.register(payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
