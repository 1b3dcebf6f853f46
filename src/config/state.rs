// Application state module
// Everything a connection needs, built once at startup and shared read-only

use crate::auth::Authenticator;
use crate::routing::Router;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Router,
    pub auth: Box<dyn Authenticator>,
}

impl AppState {
    pub fn new(config: Config, router: Router, auth: impl Authenticator + 'static) -> Self {
        Self {
            config,
            router,
            auth: Box::new(auth),
        }
    }
}
