//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the auth and CMS crates:
//! - Unified application error and the HTTP status it maps to
//! - The persistence error taxonomy returned by every repository
//! - Value objects with the same meaning everywhere (email addresses)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod store;
}
pub mod email;

pub use email::Email;
pub use error::store::{StoreError, StoreResult};
