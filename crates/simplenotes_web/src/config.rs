//! Environment-driven server configuration.
//!
//! All runtime knobs come in through the environment (after `dotenvy` has
//! loaded `.env`); nothing is read from ambient globals past startup.

use simplenotes_core::default_log_level;
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => write!(f, "PORT must be a number in 0..=65535, got `{value}`"),
        }
    }
}

impl Error for ConfigError {}

/// Startup configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Shared bearer credential; unset disables authentication.
    pub auth_token: Option<String>,
    pub log_level: String,
    /// When set, logs rotate under this directory instead of stderr.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port_raw = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_raw))?;
        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("simplenotes.sqlite"));
        let auth_token = env::var("AUTH_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        let log_dir = env::var("LOG_DIR").ok().filter(|dir| !dir.trim().is_empty());

        Ok(Self {
            host,
            port,
            database_path,
            auth_token,
            log_level,
            log_dir,
        })
    }
}
