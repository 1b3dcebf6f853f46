//! Request handler module
//!
//! Responsible for turning an incoming request into a response: static
//! assets, route dispatch and the authentication gate.

pub mod context;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use context::RequestContext;
pub use router::{dispatch, handle_request, respond, Dispatched};
