//! HTTP response building module
//!
//! Builders for the responses the router produces, decoupled from routing logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::Response;

use super::cache::CachePolicy;

/// Body of the 404 for unmatched routes
pub const PAGE_NOT_FOUND: &str = "Page not found!";
/// Body of the 404 for missing static assets
pub const ASSET_NOT_FOUND: &str = "Asset not found!";

/// Build 404 for a URI no route matched
pub fn build_page_not_found() -> Response<Full<Bytes>> {
    build_text_response(404, PAGE_NOT_FOUND)
}

/// Build 404 for a missing file under `/assets/`
pub fn build_asset_not_found() -> Response<Full<Bytes>> {
    build_text_response(404, ASSET_NOT_FOUND)
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::ASSET.to_header_value())
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(413, "413 Payload Too Large")
}

/// Build 302 redirect response
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(302)
        .header("Location", target)
        .header("Cache-Control", CachePolicy::NoStore.to_header_value())
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Redirecting...")))
        .unwrap_or_else(|e| {
            log_build_error("302", &e);
            Response::new(Full::new(Bytes::from("Redirecting...")))
        })
}

/// Build plain-text response
pub fn build_text_response(status: u16, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(body))
        })
}

/// Build generic HTML response
pub fn build_html_response(status: u16, content: String) -> Response<Full<Bytes>> {
    let content_length = content.len();

    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build static asset response with `ETag` and cache control
pub fn build_asset_response(data: Bytes, content_type: &str, etag: &str) -> Response<Full<Bytes>> {
    let content_length = data.len();

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::ASSET.to_header_value())
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Stamp the `Server` header onto an outgoing response
pub fn with_server_header(
    mut resp: Response<Full<Bytes>>,
    server_name: &str,
) -> Response<Full<Bytes>> {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            resp.headers_mut().insert(SERVER, value);
        }
        Err(e) => log_build_error("Server header", &e),
    }
    resp
}

/// Log response build error
fn log_build_error(what: &str, error: &impl std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
}
