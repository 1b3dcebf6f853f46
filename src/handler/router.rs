//! Request dispatch module
//!
//! Entry point for HTTP request processing: body size check, static assets,
//! route matching, the login gate and the 404 fallback.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::{self, Authenticator};
use crate::config::AppState;
use crate::handler::{static_files, RequestContext};
use crate::http;
use crate::logger::{self, AccessLogEntry, Outcome};
use crate::routing::Router;

/// A finished request: the response plus what produced it
#[derive(Debug)]
pub struct Dispatched {
    pub response: Response<Full<Bytes>>,
    pub outcome: Outcome,
    /// Registered path of the matched route
    pub route: Option<String>,
}

impl Dispatched {
    const fn new(response: Response<Full<Bytes>>, outcome: Outcome) -> Self {
        Self {
            response,
            outcome,
            route: None,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let version = parts.version;

    let ctx = RequestContext::new(
        parts.method,
        &parts.uri,
        parts.headers,
        &state.config.server.base_path,
    )
    .with_remote_addr(remote_addr);

    let dispatched = match check_body_size(&ctx, state.config.http.max_body_size) {
        Some(resp) => Dispatched::new(resp, Outcome::Rejected),
        None => respond(&ctx, &state).await,
    };

    if state.config.logging.access_log {
        log_access(&ctx, &parts.uri, version, &dispatched, started, &state);
    }

    Ok(http::with_server_header(
        dispatched.response,
        &state.config.http.server_name,
    ))
}

/// Static assets first, then the route table
pub async fn respond(ctx: &RequestContext, state: &AppState) -> Dispatched {
    if let Some(resp) = static_files::serve_static(ctx, &state.config.assets.root_dir).await {
        return Dispatched::new(resp, Outcome::Asset);
    }

    dispatch(
        ctx,
        &state.router,
        state.auth.as_ref(),
        &state.config.auth.login_path,
    )
}

/// Match the request against the route table and run the winning handler
///
/// A gated route seen by a visitor who is not logged in ends in a redirect to
/// the login page; the handler is not called.
pub fn dispatch(
    ctx: &RequestContext,
    router: &Router,
    auth: &dyn Authenticator,
    login_path: &str,
) -> Dispatched {
    let Some(matched) = router.find(&ctx.method, &ctx.path) else {
        logger::log_warning(&format!("No matching route for URI: {}", ctx.path));
        return Dispatched::new(http::build_page_not_found(), Outcome::NotFound);
    };

    let route = matched.route;
    if route.auth_required && !auth.is_logged_in(ctx) {
        logger::log_debug(&format!(
            "Login required for {} {}, redirecting",
            route.method,
            route.raw_path()
        ));
        let target = auth::login_redirect_target(login_path, &ctx.original_uri);
        return Dispatched {
            response: http::build_redirect_response(&target),
            outcome: Outcome::LoginRedirect,
            route: Some(route.raw_path().to_string()),
        };
    }

    Dispatched {
        response: (route.handler)(&matched.params, &ctx.query),
        outcome: Outcome::Handled,
        route: Some(route.raw_path().to_string()),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(ctx: &RequestContext, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = ctx.header("content-length")?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn log_access(
    ctx: &RequestContext,
    uri: &hyper::Uri,
    version: Version,
    dispatched: &Dispatched,
    started: Instant,
    state: &AppState,
) {
    let remote_addr = ctx
        .remote_addr
        .map_or_else(|| "-".to_string(), |a| a.ip().to_string());
    let mut entry =
        AccessLogEntry::new(remote_addr, ctx.method.to_string(), uri.path().to_string());
    entry.query = uri.query().map(ToString::to_string);
    entry.http_version = version_str(version).to_string();
    entry.status = dispatched.response.status().as_u16();
    entry.body_bytes = dispatched
        .response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = ctx.header("referer").map(ToString::to_string);
    entry.user_agent = ctx.header("user-agent").map(ToString::to_string);
    entry.route.clone_from(&dispatched.route);
    entry.outcome = dispatched.outcome;
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
