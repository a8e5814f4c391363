//! Application Layer
//!
//! Token handling, session resolution, route guards and use cases.

pub mod config;
pub mod guard;
pub mod manage_users;
pub mod session;
pub mod sign_in;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use guard::{ADMINS, CONTENT_EDITORS, authorize, require_auth, require_role};
pub use manage_users::{AdminSeed, CreateUserInput, ManageUsersUseCase, UpdateUserInput};
pub use session::SessionResolver;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{Claims, TokenCodec};
