//! User service for business logic operations.
//!
//! Enforces the invariants the repository deliberately does not: email
//! uniqueness, password hashing, and credential verification. Every
//! operation that addresses a specific id raises `NotFound` when the row
//! is absent; `Option` survives only on genuine existence tests.

use uuid::Uuid;

use crate::api::dto::{CreateUserRequest, RegisterRequest, UpdateUserRequest};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserChanges};
use crate::repositories::UserRepository;
use crate::utils::password::{hash_password, verify_password};

/// User service for handling user-related business logic.
///
/// Wraps the `UserRepository`; cloning is cheap since the repository holds
/// the pool by `Arc` internally.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates a new user (admin path: flags are taken from the request).
    ///
    /// Fails with `Duplicate` when the email is already registered. The
    /// plaintext password is hashed here; the repository only ever sees
    /// the hash.
    pub async fn create(&self, request: CreateUserRequest) -> AppResult<User> {
        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::duplicate_email(&request.email));
        }

        let new_user = NewUser {
            email: request.email,
            hashed_password: hash_password(&request.password)?,
            is_active: request.is_active,
            is_superuser: request.is_superuser,
            full_name: request.full_name,
        };
        self.repo.create(new_user).await
    }

    /// Self-registration. Always yields an active, non-privileged account
    /// regardless of anything in the request.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::duplicate_email(&request.email));
        }

        let new_user = NewUser {
            email: request.email,
            hashed_password: hash_password(&request.password)?,
            is_active: true,
            is_superuser: false,
            full_name: request.full_name,
        };
        self.repo.create(new_user).await
    }

    /// Gets a user by id, raising `NotFound` when absent.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Gets a user by id. `None` when no such user exists.
    pub async fn find(&self, id: Uuid) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Gets a user by email. `None` when no such user exists.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    /// Lists users with skip/limit pagination, returning the page and the
    /// total number of users.
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let users = self.repo.list(skip, limit).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    /// Applies a partial update.
    ///
    /// A changed email is checked for collision with other users; a present
    /// password is re-hashed. An update with nothing to change returns the
    /// stored row untouched.
    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<User> {
        let user = self.get(id).await?;

        if let Some(ref new_email) = request.email
            && *new_email != user.email
            && self.repo.find_by_email(new_email).await?.is_some()
        {
            return Err(AppError::duplicate_email(new_email));
        }

        let changes = UserChanges {
            email: request.email,
            hashed_password: match request.password {
                Some(ref password) => Some(hash_password(password)?),
                None => None,
            },
            is_active: request.is_active,
            is_superuser: request.is_superuser,
            full_name: request.full_name,
        };

        if changes.is_empty() {
            return Ok(user);
        }

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Changes a user's password after verifying the current one.
    ///
    /// An incorrect current password is an `Unauthorized` error, not a
    /// validation error: it is a failed proof of identity.
    pub async fn update_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<User> {
        let user = self.get(id).await?;

        if !verify_password(current_password, &user.hashed_password) {
            return Err(AppError::Unauthorized {
                message: "Current password is incorrect".to_string(),
            });
        }

        let changes = UserChanges {
            hashed_password: Some(hash_password(new_password)?),
            ..Default::default()
        };

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Verifies credentials.
    ///
    /// Returns `None` both for an unknown email and for a wrong password,
    /// so callers cannot distinguish the two cases (no user enumeration).
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Ok(None);
        };

        if !verify_password(password, &user.hashed_password) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Deletes a user, returning the pre-deletion snapshot.
    ///
    /// Owned items go with the user (cascade delete at the storage level).
    pub async fn delete(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Counts all users.
    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }
}
