//! Session Resolver
//!
//! Finds the request's token (session cookie first, then the
//! `Authorization` header) and decodes it into a [`Principal`].

use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::value_object::principal::Principal;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct SessionResolver {
    codec: Arc<TokenCodec>,
    cookie_name: Arc<str>,
}

impl SessionResolver {
    pub fn new(codec: Arc<TokenCodec>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            codec,
            cookie_name: cookie_name.into(),
        }
    }

    /// Resolver over a fresh codec for `config`. Resolvers built from the
    /// same config accept each other's tokens.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Arc::new(TokenCodec::new(config)), config.cookie_name.as_str())
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Raw session cookie value, if any
    pub fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        platform::cookie::extract_cookie(headers, &self.cookie_name)
    }

    /// Cookie first; the header is consulted only when the cookie is
    /// absent or does not verify.
    pub fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        self.resolve_cookie(headers)
            .or_else(|| self.resolve_header(headers))
    }

    /// Principal from the session cookie alone
    pub fn resolve_cookie(&self, headers: &HeaderMap) -> Option<Principal> {
        let token = self.session_cookie(headers)?;
        self.codec.verify(&token)
    }

    fn resolve_header(&self, headers: &HeaderMap) -> Option<Principal> {
        let token = authorization_token(headers)?;
        self.codec.verify(token)
    }
}

/// `Authorization` value with an optional `Bearer ` prefix stripped.
pub fn authorization_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use axum::http::HeaderValue;

    fn resolver() -> SessionResolver {
        SessionResolver::from_config(&AuthConfig::with_random_secret())
    }

    fn headers(cookie: Option<&str>, authorization: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = cookie {
            headers.insert(
                header::COOKIE,
                HeaderValue::from_str(&format!("theme=dark; token={token}")).unwrap(),
            );
        }
        if let Some(value) = authorization {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_cookie_only() {
        let resolver = resolver();
        let editor = Principal::new(3, UserRole::Editor);
        let token = resolver.codec().issue(&editor).unwrap();

        assert_eq!(resolver.resolve(&headers(Some(&token), None)), Some(editor));
    }

    #[test]
    fn test_invalid_cookie_falls_back_to_header() {
        let resolver = resolver();
        let admin = Principal::new(1, UserRole::Admin);
        let token = resolver.codec().issue(&admin).unwrap();
        let bearer = format!("Bearer {token}");

        let resolved = resolver.resolve(&headers(Some("garbage"), Some(&bearer)));
        assert_eq!(resolved, Some(admin));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let resolver = resolver();
        let from_cookie = Principal::new(1, UserRole::Admin);
        let from_header = Principal::new(2, UserRole::Editor);
        let cookie = resolver.codec().issue(&from_cookie).unwrap();
        let bearer = format!("Bearer {}", resolver.codec().issue(&from_header).unwrap());

        let resolved = resolver.resolve(&headers(Some(&cookie), Some(&bearer)));
        assert_eq!(resolved, Some(from_cookie));
    }

    #[test]
    fn test_header_without_bearer_prefix() {
        let resolver = resolver();
        let editor = Principal::new(9, UserRole::Editor);
        let token = resolver.codec().issue(&editor).unwrap();

        assert_eq!(resolver.resolve(&headers(None, Some(&token))), Some(editor));
    }

    #[test]
    fn test_nothing_resolves_to_none() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(&HeaderMap::new()), None);
        assert_eq!(resolver.resolve(&headers(Some("bad"), Some("Bearer bad"))), None);
        assert_eq!(resolver.resolve(&headers(None, Some("Bearer "))), None);
    }

    #[test]
    fn test_resolve_cookie_ignores_header() {
        let resolver = resolver();
        let token = resolver.codec().issue(&Principal::new(1, UserRole::Admin)).unwrap();
        let bearer = format!("Bearer {token}");
        assert_eq!(resolver.resolve_cookie(&headers(None, Some(&bearer))), None);
    }
}
