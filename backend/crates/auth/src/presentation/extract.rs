//! Request extractors
//!
//! `Authenticated` runs the session resolver and the authentication guard
//! in one step. Any router state that can hand out a [`SessionResolver`]
//! (via `FromRef`) can use it, which is how the CMS handlers share it.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::application::guard::require_auth;
use crate::application::session::SessionResolver;
use crate::domain::value_object::principal::Principal;
use crate::error::AuthError;

/// A request carrying a valid session. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    SessionResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = SessionResolver::from_ref(state);
        require_auth(resolver.resolve(&parts.headers)).map(Authenticated)
    }
}
