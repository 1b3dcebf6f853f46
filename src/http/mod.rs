//! HTTP protocol layer module
//!
//! Response builders, MIME lookup and cache helpers shared by the router,
//! the static asset handler and the site pages.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_413_response, build_asset_not_found, build_asset_response,
    build_html_response, build_page_not_found, build_redirect_response, build_text_response,
    with_server_header, ASSET_NOT_FOUND, PAGE_NOT_FOUND,
};
