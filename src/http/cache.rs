//! HTTP cache control module
//!
//! `ETag` generation for static assets and `Cache-Control` policies.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from asset content, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// True when an `If-None-Match` header names the asset's current `ETag`
///
/// Comparison is weak, so `W/"abc"` matches `"abc"`.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}

/// Cache-Control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Shared caches may keep the response for max-age seconds
    Public(u32),
    /// Never stored (login redirects, gated pages)
    NoStore,
}

impl CachePolicy {
    /// Assets are revalidated hourly through their `ETag`
    pub const ASSET: Self = Self::Public(3600);

    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoStore => "no-store".to_string(),
        }
    }
}
