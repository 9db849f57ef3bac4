//! Repository layer for data access.
//!
//! `Repository` is the single storage port used by every service. Each call
//! is atomic on its own; callers compose them.

pub mod entities;
mod memory_store;
mod sql_store;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{NewOrder, NewUser, Order, User, UserPatch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use memory_store::MemoryStore;
pub use sql_store::SqlStore;

/// Storage port for users and their orders.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Find user by email address (exact match)
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user with a fresh ID
    async fn insert_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Apply a patch to an existing user
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> AppResult<User>;

    /// Delete a user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Insert a new order with a fresh ID
    async fn insert_order(&self, new_order: NewOrder) -> AppResult<Order>;

    /// All orders owned by a user, in insertion order
    async fn find_orders_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Order>>;

    /// Find order by ID
    async fn find_order_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Delete an order by ID
    async fn delete_order(&self, id: Uuid) -> AppResult<()>;

    /// Delete every order owned by a user, returning how many were removed
    async fn delete_orders_by_owner(&self, owner_id: Uuid) -> AppResult<u64>;

    /// Every order in the system, in insertion order
    async fn find_all_orders(&self) -> AppResult<Vec<Order>>;

    /// Set the `superUser` flag on the user with this email
    async fn promote(&self, email: &str) -> AppResult<User>;
}
