//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::{Email, StoreResult};

use crate::domain::entity::user::{NewUser, User, UserChanges};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>>;

    /// Lookup used by login
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Insert; `Conflict` when the email is taken
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    /// `NotFound` when no such id
    async fn update(&self, id: i32, changes: UserChanges) -> StoreResult<User>;

    /// `NotFound` when no such id
    async fn delete(&self, id: i32) -> StoreResult<()>;
}
