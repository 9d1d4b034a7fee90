//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// With `dry_run`, shows pending migrations without applying them;
    /// with `rollback`, reverts that many most recent migrations;
    /// otherwise applies all pending migrations.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        if dry_run {
            self.show_pending_migrations().await?;
            return Ok(());
        }

        if let Some(steps) = rollback {
            self.rollback_migrations(steps).await?;
        } else {
            self.run_migrations().await?;
        }

        Ok(())
    }

    /// Show pending migrations without applying them
    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let database_url = self.config.database.url.clone();
        let pending_count: usize = tokio::task::spawn_blocking(move || {
            use diesel::Connection;
            use diesel::pg::PgConnection;
            use diesel_migrations::MigrationHarness;

            let mut conn = PgConnection::establish(&database_url).map_err(|e| {
                crate::error::AppError::Database {
                    operation: "establish connection for migration check".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                }
            })?;

            let pending = conn.pending_migrations(MIGRATIONS).map_err(|e| {
                crate::error::AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                }
            })?;

            Ok::<_, crate::error::AppError>(pending.len())
        })
        .await
        .map_err(|e| crate::error::AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if pending_count == 0 {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s)", pending_count);
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    /// Run pending migrations
    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = crate::db::run_pending_migrations(&self.config.database.url).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
            println!("Database migration completed successfully");
        }

        Ok(())
    }

    /// Rollback the specified number of migrations
    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(crate::error::AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {} migration(s)...", steps);

        let database_url = self.config.database.url.clone();
        let reverted_count: usize = tokio::task::spawn_blocking(move || {
            use diesel::Connection;
            use diesel::pg::PgConnection;
            use diesel_migrations::MigrationHarness;

            let mut conn = PgConnection::establish(&database_url).map_err(|e| {
                crate::error::AppError::Database {
                    operation: "establish connection for rollback".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                }
            })?;

            let applied =
                conn.applied_migrations()
                    .map_err(|e| crate::error::AppError::Database {
                        operation: "get applied migrations".to_string(),
                        source: anyhow::anyhow!("Migration error: {}", e),
                    })?;

            if applied.len() < steps as usize {
                return Err(crate::error::AppError::Validation {
                    field: "rollback_steps".to_string(),
                    reason: format!(
                        "Cannot rollback {} migrations - only {} applied migrations available",
                        steps,
                        applied.len()
                    ),
                });
            }

            let mut reverted_count = 0;
            for _ in 0..steps {
                conn.revert_last_migration(MIGRATIONS).map_err(|e| {
                    crate::error::AppError::Database {
                        operation: "revert migration".to_string(),
                        source: anyhow::anyhow!("Migration rollback error: {}", e),
                    }
                })?;
                reverted_count += 1;
            }

            Ok::<_, crate::error::AppError>(reverted_count)
        })
        .await
        .map_err(|e| crate::error::AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        println!("✓ Rolled back {} migration(s)", reverted_count);

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[tokio::test]
    async fn zero_rollback_steps_is_rejected() {
        let handler = MigrateCommandHandler::new(create_valid_config());

        let result = handler.execute(false, Some(0)).await;
        match result {
            Err(crate::error::AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("must be greater than 0"));
            }
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn empty_database_url_is_rejected() {
        let handler = MigrateCommandHandler::new(Settings::default());
        assert!(handler.execute(true, None).await.is_err());
    }
}
