//! JWT authentication middleware.
//!
//! Validates bearer tokens and resolves the caller to a full user row,
//! so downstream handlers see the flags as they are now, not as they
//! were when the token was issued.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;
use crate::utils::jwt::validate_access_token;

/// The authenticated caller, added to request extensions after a
/// successful token check. Extract in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// JWT authentication middleware.
///
/// Expects `Authorization: Bearer <token>`. Rejects with 401 when the
/// header is missing or malformed, the token fails validation, or the
/// token's subject no longer resolves to a user; rejects with 403 when
/// the account has been deactivated since the token was issued.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let user_id = claims.user_id()?;

    // A deleted user may still hold an unexpired token.
    let user = state
        .services
        .users
        .find(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "User no longer exists".to_string(),
        })?;

    if !user.is_active {
        return Err(AppError::Forbidden {
            message: "Account is deactivated".to_string(),
        });
    }

    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}

/// Superuser gate, layered after `auth_middleware`.
///
/// Rejects with 403 when the authenticated caller lacks the superuser
/// flag.
pub async fn superuser_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let is_superuser = request
        .extensions()
        .get::<AuthUser>()
        .map(|auth| auth.0.is_superuser)
        .unwrap_or(false);

    if !is_superuser {
        return Err(AppError::Forbidden {
            message: "Superuser privileges required".to_string(),
        });
    }

    Ok(next.run(request).await)
}
