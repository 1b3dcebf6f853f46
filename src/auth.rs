//! Authentication gate
//!
//! Gated routes ask an [`Authenticator`] whether the visitor is logged in.
//! The session store behind it is not part of this crate; the bundled
//! [`SessionCookieAuth`] only checks that a session cookie is present.

use url::form_urlencoded;

use crate::handler::RequestContext;

/// Decides whether a request belongs to a logged-in visitor
pub trait Authenticator: Send + Sync {
    fn is_logged_in(&self, ctx: &RequestContext) -> bool;
}

impl<F> Authenticator for F
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    fn is_logged_in(&self, ctx: &RequestContext) -> bool {
        self(ctx)
    }
}

/// Logged in iff the request carries a non-empty session cookie
#[derive(Debug, Clone)]
pub struct SessionCookieAuth {
    cookie_name: String,
}

impl SessionCookieAuth {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl Authenticator for SessionCookieAuth {
    fn is_logged_in(&self, ctx: &RequestContext) -> bool {
        ctx.cookie(&self.cookie_name)
            .is_some_and(|v| !v.trim().is_empty())
    }
}

/// Login URL carrying the original request URI as `redirect_path`
///
/// The URI is form-urlencoded, so `/` becomes `%2F` and spaces become `+`.
pub fn login_redirect_target(login_path: &str, original_uri: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(original_uri.as_bytes()).collect();
    format!("{login_path}?redirect_path={encoded}")
}
