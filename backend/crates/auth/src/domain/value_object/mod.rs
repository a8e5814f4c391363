//! Value Object Module

pub mod principal;
pub mod user_role;

pub use principal::Principal;
pub use user_role::UserRole;
