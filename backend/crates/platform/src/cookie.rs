//! Cookie Management Infrastructure
//!
//! `Set-Cookie` rendering and `Cookie` header parsing.

use axum::http::{HeaderMap, HeaderValue, header};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of one named cookie.
///
/// `secure` is decided per response, since the same deployment can be
/// reached over plain HTTP in development and HTTPS behind a proxy.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<u64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "token".to_string(),
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build the `Set-Cookie` value carrying `value`.
    pub fn build_set_cookie(&self, value: &str, secure: bool) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build the `Set-Cookie` value that makes the browser drop the cookie.
    ///
    /// Attributes mirror [`build_set_cookie`](Self::build_set_cookie) so the
    /// browser matches it against the stored one.
    pub fn build_delete_cookie(&self, secure: bool) -> String {
        let mut cookie = format!("{}=", self.name);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str("; Max-Age=0");

        cookie
    }
}

/// Extract a cookie value from the request headers.
///
/// Every `Cookie` header is scanned. An empty value counts as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Create a `Set-Cookie` header value.
pub fn set_cookie_header(cookie: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_cookie() -> CookieConfig {
        CookieConfig {
            name: "token".to_string(),
            max_age_secs: Some(86_400),
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_build_set_cookie() {
        let cookie = session_cookie().build_set_cookie("abc.def.ghi", true);
        assert!(cookie.starts_with("token=abc.def.ghi"));
        assert!(cookie.contains("; HttpOnly"));
        assert!(cookie.contains("; Secure"));
        assert!(cookie.contains("; SameSite=Lax"));
        assert!(cookie.contains("; Path=/"));
        assert!(cookie.contains("; Max-Age=86400"));
    }

    #[test]
    fn test_build_set_cookie_plain_transport_omits_secure() {
        let cookie = session_cookie().build_set_cookie("v", false);
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_build_delete_cookie() {
        let cookie = session_cookie().build_delete_cookie(false);
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("; Max-Age=0"));
        assert!(cookie.contains("; Path=/"));
        assert!(cookie.contains("; SameSite=Lax"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_empty_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(extract_cookie(&headers, "token"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("token=xyz"));
        assert_eq!(extract_cookie(&headers, "token"), Some("xyz".to_string()));
    }
}
