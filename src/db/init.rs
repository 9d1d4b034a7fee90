//! First-run data seeding.

use tracing::info;

use crate::api::dto::CreateUserRequest;
use crate::config::SuperuserConfig;
use crate::error::AppResult;
use crate::services::Services;

/// Ensures the configured superuser account exists.
///
/// Idempotent: when the email is already registered the existing account
/// is left untouched, whatever its flags. Safe to run on every startup.
pub async fn bootstrap_superuser(
    services: &Services,
    superuser: &SuperuserConfig,
) -> AppResult<()> {
    if services
        .users
        .get_by_email(&superuser.email)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let request = CreateUserRequest {
        email: superuser.email.clone(),
        password: superuser.password.clone(),
        is_active: true,
        is_superuser: true,
        full_name: None,
    };
    let user = services.users.create(request).await?;

    info!(email = %user.email, "Superuser account created");

    Ok(())
}
