//! Route table
//!
//! Routes are registered on a [`RouterBuilder`] and compiled once into an
//! immutable [`Router`]. Lookup walks the routes in registration order and the
//! first method + pattern match wins, regardless of how specific later routes are.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use std::fmt;
use std::sync::Arc;

use super::params::{PathParams, QueryParams};
use super::pattern::PathPattern;
use crate::error::{Error, Result};

/// Route handler: path parameters and query mapping in, response out
pub type Handler = Arc<dyn Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync>;

/// Method a route answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
    /// Wildcard, answers every method
    Any,
}

impl RouteMethod {
    pub fn matches(self, method: &Method) -> bool {
        match self {
            Self::Get => *method == Method::GET,
            Self::Post => *method == Method::POST,
            Self::Any => true,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Any => "ANY",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled route
pub struct Route {
    pub method: RouteMethod,
    pub pattern: PathPattern,
    pub handler: Handler,
    pub auth_required: bool,
}

impl Route {
    /// The path as it was registered
    pub fn raw_path(&self) -> &str {
        self.pattern.raw()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.raw_path())
            .field("auth_required", &self.auth_required)
            .finish_non_exhaustive()
    }
}

/// Successful lookup
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

struct PendingRoute {
    method: RouteMethod,
    path: String,
    handler: Handler,
    auth_required: bool,
}

/// Collects route registrations before compilation
#[derive(Default)]
pub struct RouterBuilder {
    pending: Vec<PendingRoute>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Duplicate or overlapping paths are accepted as-is;
    /// whichever was registered first shadows the rest.
    #[must_use]
    pub fn route<F>(
        mut self,
        method: RouteMethod,
        path: &str,
        handler: F,
        auth_required: bool,
    ) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.pending.push(PendingRoute {
            method,
            path: path.to_string(),
            handler: Arc::new(handler),
            auth_required,
        });
        self
    }

    #[must_use]
    pub fn get<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Get, path, handler, false)
    }

    #[must_use]
    pub fn post<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Post, path, handler, false)
    }

    #[must_use]
    pub fn any<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Any, path, handler, false)
    }

    /// `get` behind the login gate
    #[must_use]
    pub fn get_gated<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Get, path, handler, true)
    }

    #[must_use]
    pub fn post_gated<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Post, path, handler, true)
    }

    #[must_use]
    pub fn any_gated<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&PathParams, &QueryParams) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.route(RouteMethod::Any, path, handler, true)
    }

    /// Compile every registered path. Fails on the first malformed pattern.
    pub fn build(self) -> Result<Router> {
        let routes = self
            .pending
            .into_iter()
            .map(|p| {
                let pattern = PathPattern::compile(&p.path).map_err(|source| {
                    Error::InvalidPattern {
                        path: p.path.clone(),
                        source,
                    }
                })?;
                Ok(Route {
                    method: p.method,
                    pattern,
                    handler: p.handler,
                    auth_required: p.auth_required,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Router { routes })
    }
}

/// Immutable, ordered route table
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// First route whose method and pattern both match
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|route| route.method.matches(method))
            .find_map(|route| {
                route
                    .pattern
                    .captures(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
