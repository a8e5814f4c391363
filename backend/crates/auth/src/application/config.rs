//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::env;
use std::fmt;
use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

/// Shortest signing secret accepted outside debug builds
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// HS256 signing secret. Debug output is redacted.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret").field(&"[REDACTED]").finish()
    }
}

/// Path layout the edge gate inspects.
#[derive(Debug, Clone)]
pub struct GatePaths {
    /// Page prefix requiring a session
    pub protected_prefix: String,
    /// Login page (inside the protected prefix, but never gated)
    pub login_path: String,
    /// Where an already signed-in visitor of the login page is sent
    pub dashboard_path: String,
    /// API prefix that receives a synthesized bearer header
    pub api_prefix: String,
}

impl Default for GatePaths {
    fn default() -> Self {
        Self {
            protected_prefix: "/admin".to_string(),
            login_path: "/admin/login".to_string(),
            dashboard_path: "/admin/dashboard".to_string(),
            api_prefix: "/api".to_string(),
        }
    }
}

/// True when `path` equals `prefix` or continues it with a new segment.
///
/// `/admin` matches `/admin` and `/admin/news`, never `/administrator`.
pub fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: TokenSecret,
    /// Token lifetime; also the session cookie `Max-Age`
    pub token_ttl: Duration,
    pub cookie_name: String,
    pub cookie_same_site: SameSite,
    /// Honour `X-Forwarded-Proto` when deciding the cookie `Secure` flag
    pub trust_forwarded_proto: bool,
    pub gate: GatePaths,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: TokenSecret::new(Vec::new()),
            token_ttl: Duration::from_secs(24 * 3600),
            cookie_name: "token".to_string(),
            cookie_same_site: SameSite::Lax,
            trust_forwarded_proto: false,
            gate: GatePaths::default(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: TokenSecret::new(secret.to_vec()),
            ..Default::default()
        }
    }

    /// Development config: random secret, tokens die with the process
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` is mandatory in release builds. Debug builds fall back
    /// to a random secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if secret.len() < MIN_SECRET_LEN {
                    if cfg!(debug_assertions) {
                        tracing::warn!(
                            len = secret.len(),
                            "JWT_SECRET is shorter than {} bytes",
                            MIN_SECRET_LEN
                        );
                    } else {
                        return Err(ConfigError::Invalid {
                            name: "JWT_SECRET",
                            reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
                        });
                    }
                }
                Self {
                    token_secret: TokenSecret::new(secret.into_bytes()),
                    ..Default::default()
                }
            }
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random development secret");
                Self::development()
            }
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        if let Ok(hours) = env::var("TOKEN_TTL_HOURS") {
            let hours: u64 = hours.parse().map_err(|_| ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                reason: "expected a whole number of hours".to_string(),
            })?;
            config.token_ttl = Duration::from_secs(hours * 3600);
        }

        config.trust_forwarded_proto = env::var("TRUST_FORWARDED_PROTO")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        config.password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        let gate = &mut config.gate;
        for (var, slot) in [
            ("ADMIN_PREFIX", &mut gate.protected_prefix),
            ("ADMIN_LOGIN_PATH", &mut gate.login_path),
            ("ADMIN_DASHBOARD_PATH", &mut gate.dashboard_path),
            ("API_PREFIX", &mut gate.api_prefix),
        ] {
            if let Ok(value) = env::var(var) {
                if !value.starts_with('/') {
                    return Err(ConfigError::Invalid {
                        name: var,
                        reason: "must start with '/'".to_string(),
                    });
                }
                *slot = value;
            }
        }

        Ok(config)
    }

    /// Attributes of the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl.as_secs()),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.cookie_name, "token");
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.gate.login_path, "/admin/login");
        assert_eq!(config.gate.dashboard_path, "/admin/dashboard");
    }

    #[test]
    fn test_session_cookie_max_age_matches_ttl() {
        let cookie = AuthConfig::default().session_cookie();
        assert_eq!(cookie.max_age_secs, Some(86_400));
        assert_eq!(cookie.path, "/");
        assert!(cookie.http_only);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.as_bytes().len(), 32);
        assert_ne!(a.token_secret.as_bytes(), b.token_secret.as_bytes());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = TokenSecret::new(b"super-secret".to_vec());
        assert!(!format!("{:?}", secret).contains("super-secret"));
    }

    #[test]
    fn test_is_under_is_segment_aware() {
        assert!(is_under("/admin", "/admin"));
        assert!(is_under("/admin/", "/admin"));
        assert!(is_under("/admin/news/3", "/admin"));
        assert!(!is_under("/administrator", "/admin"));
        assert!(!is_under("/api", "/admin"));
        assert!(is_under("/api/news", "/api/"));
    }
}
