//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between
//! repositories and handlers.

mod item_service;
mod user_service;

pub use item_service::{ItemService, can_modify};
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the underlying pool uses `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub items: ItemService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            items: ItemService::new(repos.items, repos.users),
        }
    }
}
