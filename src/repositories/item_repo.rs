//! Item repository for async database operations.
//!
//! CRUD plus owner-scoped queries for the items table. The repository does
//! not check that an owner exists; that invariant is enforced by the
//! service layer before inserts.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Item, ItemChanges, NewItem};

/// Item repository holding an async connection pool.
#[derive(Clone)]
pub struct ItemRepository {
    pool: AsyncDbPool,
}

impl ItemRepository {
    /// Creates a new ItemRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new item. `new_item` carries the owner stamp.
    pub async fn create(&self, new_item: NewItem) -> Result<Item, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(items)
            .values(&new_item)
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds an item by its ID. `None` if no such row exists.
    pub async fn find_by_id(&self, item_id: Uuid) -> Result<Option<Item>, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(id.eq(item_id))
            .select(Item::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists items with offset/limit pagination, ordered by (created_at, id).
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Item>, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .order((created_at.asc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Item::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists a single owner's items with offset/limit pagination.
    pub async fn list_by_owner(
        &self,
        owner: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Item>, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(owner_id.eq(owner))
            .order((created_at.asc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Item::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a partial update. Fields left as `None` are untouched.
    pub async fn update(
        &self,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<Option<Item>, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(items.filter(id.eq(item_id)))
            .set(&changes)
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Deletes an item, returning the pre-deletion snapshot; `None` when absent.
    pub async fn delete(&self, item_id: Uuid) -> Result<Option<Item>, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(items.filter(id.eq(item_id)))
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Counts all items.
    pub async fn count(&self) -> Result<i64, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts a single owner's items.
    pub async fn count_by_owner(&self, owner: Uuid) -> Result<i64, AppError> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(owner_id.eq(owner))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
