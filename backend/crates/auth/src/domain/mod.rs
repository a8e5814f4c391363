//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity {
    pub mod user;
}
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{NewUser, User, UserChanges};
pub use repository::UserRepository;
pub use value_object::{Principal, UserRole};
