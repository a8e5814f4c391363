//! Auth (Authentication / Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, roles, principal, repository trait
//! - `application/` - Token codec, session resolver, guards, use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - Handlers, DTOs, extractor, router, edge gate
//!
//! ## Features
//! - Email + password login issuing a signed, self-contained token
//! - Token carried in an HttpOnly `token` cookie or a Bearer header
//! - Edge gate for the admin UI (login redirects, bearer synthesis)
//! - Role guards (`admin`, `editor`) shared with the CMS handlers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens are HS256, expire after 24h, and are never stored server-side
//! - Unknown email and wrong password are indistinguishable to clients

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::manage_users::{AdminSeed, ManageUsersUseCase};
pub use application::guard::{ADMINS, CONTENT_EDITORS, authorize, require_auth, require_role};
pub use application::session::SessionResolver;
pub use application::token::TokenCodec;
pub use domain::value_object::{Principal, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::extract::Authenticated;
pub use presentation::middleware::{EdgeGate, edge_gate};
pub use presentation::router::users_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
