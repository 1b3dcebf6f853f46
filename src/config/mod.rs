// Configuration module entry point
// Layers config.toml, environment variables and built-in defaults

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{Error, Result};

pub use state::AppState;
pub use types::{
    AssetsConfig, AuthConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Environment variable naming an alternative config file (without extension)
pub const CONFIG_PATH_ENV: &str = "MEMORIES_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Load configuration from `$MEMORIES_CONFIG` or `config.toml`
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self> {
        let settings = Self::with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MEMORIES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Built-in defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self> {
        Ok(Self::with_defaults(config::Config::builder())?
            .build()?
            .try_deserialize()?)
    }

    fn with_defaults(builder: Builder) -> std::result::Result<Builder, config::ConfigError> {
        builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_path", "/")?
            .set_default("assets.root_dir", ".")?
            .set_default("auth.login_path", "/login")?
            .set_default("auth.session_cookie", "session")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "memories-server")?
            .set_default("http.max_body_size", 10_485_760) // 10MB
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                Error::InvalidAddress(format!("{}:{}: {e}", self.server.host, self.server.port))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.http.server_name, "memories-server");
    }

    #[test]
    fn test_builtin_defaults() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.base_path, "/");
        assert_eq!(cfg.auth.login_path, "/login");
        assert_eq!(cfg.auth.session_cookie, "session");
        assert_eq!(cfg.assets.root_dir, ".");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::defaults().unwrap();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(matches!(cfg.get_socket_addr(), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_debug_level() {
        let mut cfg = Config::defaults().unwrap();
        assert!(!cfg.logging.debug_enabled());
        cfg.logging.level = "DEBUG".to_string();
        assert!(cfg.logging.debug_enabled());
    }
}
