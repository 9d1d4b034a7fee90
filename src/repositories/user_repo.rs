//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async. All
//! storage errors propagate as `AppError` without being reinterpreted;
//! domain decisions happen one layer up in the services.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, User, UserChanges};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// `new_user` must already carry the hashed credential; plaintext
    /// passwords never reach this layer.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a user by their ID. `None` if no such row exists.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a user by their email address (exact, case-sensitive match).
    pub async fn find_by_email(&self, user_email: &str) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists users with offset/limit pagination.
    ///
    /// Ordered by (created_at, id) so pages stay stable across calls.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .order((created_at.asc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a partial update. Fields left as `None` are untouched.
    ///
    /// Returns `None` when the row does not exist. Callers must not pass
    /// an empty changeset (services guard with `UserChanges::is_empty`).
    pub async fn update(
        &self,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Deletes a user, returning the pre-deletion snapshot.
    ///
    /// `None` when the row does not exist, so repeated deletes are no-ops.
    pub async fn delete(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(id.eq(user_id)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Counts all users.
    pub async fn count(&self) -> Result<i64, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
