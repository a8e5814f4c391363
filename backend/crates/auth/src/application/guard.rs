//! Route Guard
//!
//! Per-operation checks applied after the session resolver ran.

use crate::domain::value_object::principal::Principal;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// User management, email sending, short-video deletion
pub const ADMINS: &[&str] = &[UserRole::ADMIN];

/// Content writes, uploads, subscriber listing
pub const CONTENT_EDITORS: &[&str] = &[UserRole::ADMIN, UserRole::EDITOR];

/// `None` ends the request with 401.
pub fn require_auth(principal: Option<Principal>) -> AuthResult<Principal> {
    principal.ok_or(AuthError::Unauthenticated)
}

/// Pure membership test.
pub fn require_role(principal: &Principal, allowed: &[&str]) -> bool {
    principal.has_any_role(allowed)
}

/// [`require_role`] turned into a 403 listing the allowed roles.
pub fn authorize(principal: &Principal, allowed: &[&str]) -> AuthResult<()> {
    if require_role(principal, allowed) {
        Ok(())
    } else {
        Err(AuthError::forbidden(allowed))
    }
}
