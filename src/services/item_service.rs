//! Item service for business logic operations.
//!
//! Adds the two checks the repository stays out of: the owner must exist
//! at creation time, and only the owner or a superuser may mutate an item.

use uuid::Uuid;

use crate::api::dto::{CreateItemRequest, UpdateItemRequest};
use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemChanges, NewItem, User};
use crate::repositories::{ItemRepository, UserRepository};

/// Whether `user` is allowed to mutate `item`.
///
/// Ownership and the superuser flag are the only inputs; there is no
/// per-item ACL.
pub fn can_modify(item: &Item, user: &User) -> bool {
    user.is_superuser || item.owner_id == user.id
}

/// Item service coordinating the item and user repositories.
#[derive(Clone)]
pub struct ItemService {
    repo: ItemRepository,
    user_repo: UserRepository,
}

impl ItemService {
    /// Creates a new ItemService with the given repositories.
    pub fn new(repo: ItemRepository, user_repo: UserRepository) -> Self {
        Self { repo, user_repo }
    }

    /// Creates an item owned by `owner_id`.
    ///
    /// Fails with `NotFound` when the owner does not resolve to a user.
    pub async fn create(&self, request: CreateItemRequest, owner_id: Uuid) -> AppResult<Item> {
        if self.user_repo.find_by_id(owner_id).await?.is_none() {
            return Err(AppError::not_found("user", owner_id));
        }

        let new_item = NewItem {
            title: request.title,
            description: request.description,
            owner_id,
        };
        self.repo.create(new_item).await
    }

    /// Gets an item by id, raising `NotFound` when absent.
    pub async fn get(&self, id: Uuid) -> AppResult<Item> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("item", id))
    }

    /// Lists all items with skip/limit pagination plus the total count.
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<(Vec<Item>, i64)> {
        let items = self.repo.list(skip, limit).await?;
        let total = self.repo.count().await?;
        Ok((items, total))
    }

    /// Lists one owner's items with skip/limit pagination plus that
    /// owner's total count.
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> AppResult<(Vec<Item>, i64)> {
        let items = self.repo.list_by_owner(owner_id, skip, limit).await?;
        let total = self.repo.count_by_owner(owner_id).await?;
        Ok((items, total))
    }

    /// Applies a partial update on behalf of `acting`.
    ///
    /// `NotFound` when the item is absent, `Forbidden` when the acting
    /// user is neither the owner nor a superuser.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateItemRequest,
        acting: &User,
    ) -> AppResult<Item> {
        let item = self.get(id).await?;

        if !can_modify(&item, acting) {
            return Err(AppError::Forbidden {
                message: "Not allowed to modify this item".to_string(),
            });
        }

        let changes = ItemChanges {
            title: request.title,
            description: request.description,
        };

        if changes.is_empty() {
            return Ok(item);
        }

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("item", id))
    }

    /// Deletes an item on behalf of `acting`, same authorization policy as
    /// `update`. Returns the pre-deletion snapshot.
    pub async fn delete(&self, id: Uuid, acting: &User) -> AppResult<Item> {
        let item = self.get(id).await?;

        if !can_modify(&item, acting) {
            return Err(AppError::Forbidden {
                message: "Not allowed to delete this item".to_string(),
            });
        }

        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("item", id))
    }

    /// Counts all items.
    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    /// Counts one owner's items.
    pub async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        self.repo.count_by_owner(owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: Uuid, is_superuser: bool) -> User {
        User {
            id,
            email: format!("{}@example.com", id),
            hashed_password: "$argon2id$placeholder".to_string(),
            is_active: true,
            is_superuser,
            full_name: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    fn item(owner_id: Uuid) -> Item {
        Item {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            owner_id,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn owner_can_modify_own_item() {
        let owner = user(Uuid::new_v4(), false);
        assert!(can_modify(&item(owner.id), &owner));
    }

    #[test]
    fn other_user_cannot_modify() {
        let owner_id = Uuid::new_v4();
        let other = user(Uuid::new_v4(), false);
        assert!(!can_modify(&item(owner_id), &other));
    }

    #[test]
    fn superuser_bypasses_ownership() {
        let owner_id = Uuid::new_v4();
        let admin = user(Uuid::new_v4(), true);
        assert!(can_modify(&item(owner_id), &admin));
    }
}
