use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://unifolhas.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Username that unlocks the sales dashboard. A placeholder check, not a role system.
    pub admin_username: String,
    /// Sessions idle for longer than this are forgotten.
    pub session_idle_timeout: Duration,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("SESSION_IDLE_SECS '{value}' is not a number of seconds: {source}")]
    InvalidSessionIdle {
        value: String,
        source: std::num::ParseIntError,
    },
}

impl AppConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
        let bind_value =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;
        let admin_username = std::env::var("ADMIN_USERNAME")
            .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_owned());
        let session_idle_timeout = match std::env::var("SESSION_IDLE_SECS") {
            Ok(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|source| ConfigError::InvalidSessionIdle { value, source })?,
            Err(_) => Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        };

        Ok(AppConfig {
            database_url,
            bind_addr,
            admin_username,
            session_idle_timeout,
        })
    }

    /// Configuration for an isolated in-memory store, used by tests.
    pub fn in_memory() -> Self {
        AppConfig {
            database_url: "sqlite::memory:".to_owned(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            admin_username: DEFAULT_ADMIN_USERNAME.to_owned(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}
