//! Database connection pool and schema migrations.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with
//! bb8, embedded migrations, and first-run data seeding.

mod init;
mod pool;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use init::bootstrap_superuser;
pub use pool::{AsyncDbPool, establish_async_connection_pool};

/// Migrations compiled into the binary from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies pending migrations, returning the names of those applied.
///
/// The migration harness is synchronous, so this runs a dedicated
/// blocking connection rather than borrowing one from the async pool.
pub async fn run_pending_migrations(database_url: &str) -> crate::error::AppResult<Vec<String>> {
    let database_url = database_url.to_string();
    let applied = tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&database_url).map_err(|e| {
            crate::error::AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::anyhow!("Connection error: {}", e),
            }
        })?;

        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            crate::error::AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            }
        })?;

        Ok::<_, crate::error::AppError>(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| crate::error::AppError::Internal {
        source: anyhow::Error::from(e),
    })??;

    Ok(applied)
}
