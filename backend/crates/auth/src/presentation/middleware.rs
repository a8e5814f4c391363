//! Edge Gate Middleware
//!
//! Runs before routing for every request:
//! - login page with a valid session cookie: redirect to the dashboard
//! - protected page without a session: redirect to login with `next`
//! - API request with a session cookie: synthesize `Authorization: Bearer`
//!   when the client sent none
//!
//! Everything else passes untouched, without parsing or verifying tokens.
//! This layer never answers 401; API handlers enforce auth themselves.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::config::{AuthConfig, GatePaths, is_under};
use crate::application::session::SessionResolver;

#[derive(Clone)]
pub struct EdgeGate {
    resolver: SessionResolver,
    paths: Arc<GatePaths>,
}

/// What the gate does with a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRoute {
    LoginPage,
    ProtectedPage,
    Api,
    Bypass,
}

impl EdgeGate {
    pub fn new(resolver: SessionResolver, paths: GatePaths) -> Self {
        Self {
            resolver,
            paths: Arc::new(paths),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(SessionResolver::from_config(config), config.gate.clone())
    }

    pub fn classify(&self, path: &str) -> GateRoute {
        let paths = &self.paths;
        if is_under(path, &paths.login_path) {
            GateRoute::LoginPage
        } else if is_under(path, &paths.protected_prefix) {
            GateRoute::ProtectedPage
        } else if is_under(path, &paths.api_prefix) {
            GateRoute::Api
        } else {
            GateRoute::Bypass
        }
    }

    /// `<login>?next=<path+query>`, percent-encoded
    fn login_redirect(&self, req: &Request<Body>) -> String {
        let original = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.uri().path());

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("next", original)
            .finish();

        format!("{}?{}", self.paths.login_path, query)
    }

    fn inject_bearer(&self, req: &mut Request<Body>) {
        if req.headers().contains_key(header::AUTHORIZATION) {
            return;
        }
        let Some(token) = self.resolver.session_cookie(req.headers()) else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                req.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => tracing::debug!("Session cookie is not a valid header value, not forwarded"),
        }
    }
}

pub async fn edge_gate(State(gate): State<EdgeGate>, mut req: Request<Body>, next: Next) -> Response {
    match gate.classify(req.uri().path()) {
        GateRoute::LoginPage => {
            if gate.resolver.resolve_cookie(req.headers()).is_some() {
                return Redirect::temporary(&gate.paths.dashboard_path).into_response();
            }
        }
        GateRoute::ProtectedPage => {
            if gate.resolver.resolve(req.headers()).is_none() {
                let target = gate.login_redirect(&req);
                tracing::debug!(path = %req.uri().path(), "No session, redirecting to login");
                return Redirect::temporary(&target).into_response();
            }
        }
        GateRoute::Api => gate.inject_bearer(&mut req),
        GateRoute::Bypass => {}
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let gate = EdgeGate::from_config(&AuthConfig::with_random_secret());
        assert_eq!(gate.classify("/admin/login"), GateRoute::LoginPage);
        assert_eq!(gate.classify("/admin/login/reset"), GateRoute::LoginPage);
        assert_eq!(gate.classify("/admin"), GateRoute::ProtectedPage);
        assert_eq!(gate.classify("/admin/news/edit/4"), GateRoute::ProtectedPage);
        assert_eq!(gate.classify("/admin/loginx"), GateRoute::ProtectedPage);
        assert_eq!(gate.classify("/api/news"), GateRoute::Api);
        assert_eq!(gate.classify("/administrator"), GateRoute::Bypass);
        assert_eq!(gate.classify("/page/reports"), GateRoute::Bypass);
        assert_eq!(gate.classify("/"), GateRoute::Bypass);
    }
}
