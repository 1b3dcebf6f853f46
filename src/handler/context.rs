//! Per-request context
//!
//! Everything the dispatcher and the authenticator look at, derived once from
//! the incoming request and dropped after the response is built.

use hyper::header::COOKIE;
use hyper::{HeaderMap, Method, Uri};
use std::net::SocketAddr;

use crate::routing::{parse_query, QueryParams};

/// Request context
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Path with the base path stripped and without the query string
    pub path: String,
    /// Path and query exactly as received, used for login redirects
    pub original_uri: String,
    pub query: QueryParams,
    pub headers: HeaderMap,
    pub remote_addr: Option<SocketAddr>,
}

impl RequestContext {
    pub fn new(method: Method, uri: &Uri, headers: HeaderMap, base_path: &str) -> Self {
        Self {
            method,
            path: strip_base_path(uri.path(), base_path),
            original_uri: uri
                .path_and_query()
                .map_or_else(|| uri.path().to_string(), ToString::to_string),
            query: parse_query(uri.query()),
            headers,
            remote_addr: None,
        }
    }

    #[must_use]
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// Header value as a string, if present and valid ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of a named cookie across all `Cookie` headers
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }
}

/// Remove the configured base path from a request path
///
/// The prefix only counts at a segment boundary, and an empty remainder
/// becomes `/`.
pub fn strip_base_path(path: &str, base_path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }

    match path.strip_prefix(base) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    #[test]
    fn test_strip_base_path() {
        assert_eq!(strip_base_path("/gallery", "/"), "/gallery");
        assert_eq!(strip_base_path("/gallery", ""), "/gallery");
        assert_eq!(strip_base_path("/memories/gallery", "/memories"), "/gallery");
        assert_eq!(strip_base_path("/memories/gallery", "/memories/"), "/gallery");
        assert_eq!(strip_base_path("/memories", "/memories"), "/");
        assert_eq!(strip_base_path("/memories/", "/memories"), "/");
        // Not a segment boundary
        assert_eq!(strip_base_path("/memoriesX/a", "/memories"), "/memoriesX/a");
        assert_eq!(strip_base_path("/other", "/memories"), "/other");
    }

    #[test]
    fn test_context_from_uri() {
        let uri: Uri = "/memories/order/7?tab=items&x=%2F".parse().unwrap();
        let ctx = RequestContext::new(Method::GET, &uri, HeaderMap::new(), "/memories");
        assert_eq!(ctx.path, "/order/7");
        assert_eq!(ctx.original_uri, "/memories/order/7?tab=items&x=%2F");
        assert_eq!(ctx.query.get("tab").map(String::as_str), Some("items"));
        assert_eq!(ctx.query.get("x").map(String::as_str), Some("/"));
        assert!(ctx.remote_addr.is_none());
    }

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; session=abc123"));
        headers.append(COOKIE, HeaderValue::from_static("cart=3"));
        let uri: Uri = "/".parse().unwrap();
        let ctx = RequestContext::new(Method::GET, &uri, headers, "/");

        assert_eq!(ctx.cookie("session"), Some("abc123"));
        assert_eq!(ctx.cookie("cart"), Some("3"));
        assert_eq!(ctx.cookie("sess"), None);
        assert_eq!(ctx.header("cookie"), Some("theme=dark; session=abc123"));
    }
}
