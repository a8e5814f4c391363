//! Client identification utilities
//!
//! What the request tells us about the client connection.

use axum::http::{HeaderMap, Uri};
use std::net::IpAddr;

/// Whether the request reached us over an encrypted transport.
///
/// An absolute `https` request URI is conclusive. Otherwise, when
/// `trust_forwarded_proto` is set (the server sits behind a TLS-terminating
/// proxy), the first `X-Forwarded-Proto` entry decides.
pub fn is_secure_transport(headers: &HeaderMap, uri: &Uri, trust_forwarded_proto: bool) -> bool {
    if let Some(scheme) = uri.scheme_str() {
        return scheme.eq_ignore_ascii_case("https");
    }

    if !trust_forwarded_proto {
        return false;
    }

    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    forwarded.or(direct_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_https_uri_is_secure() {
        let uri: Uri = "https://example.org/api/users/login".parse().unwrap();
        assert!(is_secure_transport(&HeaderMap::new(), &uri, false));
    }

    #[test]
    fn test_relative_uri_without_proxy_is_plain() {
        let uri: Uri = "/api/users/login".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert!(!is_secure_transport(&headers, &uri, false));
    }

    #[test]
    fn test_forwarded_proto_when_trusted() {
        let uri: Uri = "/api/users/login".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert!(is_secure_transport(&headers, &uri, true));

        headers.insert("x-forwarded-proto", HeaderValue::from_static("http"));
        assert!(!is_secure_transport(&headers, &uri, true));
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(extract_client_ip(&HeaderMap::new(), Some(direct)), Some(direct));
    }
}
