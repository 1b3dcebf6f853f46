//! Routing module
//!
//! Provides the ordered route table:
//! - `{name}` path patterns compiled to anchored matchers
//! - GET / POST / ANY method matching, first registered match wins
//! - Per-route authentication flag

mod params;
mod pattern;
mod table;

pub use params::{parse_query, PathParams, QueryParams};
pub use pattern::PathPattern;
pub use table::{Handler, Route, RouteMatch, RouteMethod, Router, RouterBuilder};
