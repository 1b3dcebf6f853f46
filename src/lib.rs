//! memories_server: router and HTTP host for a small photo-memories site
//!
//! Requests are matched against an ordered table of `{name}` path patterns,
//! gated routes send logged-out visitors to the login page, and `/assets/`
//! is served straight from disk.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod site;

pub use error::{Error, Result};
