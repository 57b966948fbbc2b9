use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use dotenvy::dotenv;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config invalid: {0}")]
    Invalid(String),
    #[error("store setup failed: {0}")]
    Store(#[from] crate::error::StoreError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub db_pool_size: u32,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let host = match var("POLLS_HOST") {
            None => IpAddr::from([0, 0, 0, 0]),
            Some(raw) => raw.parse::<IpAddr>()
                .map_err(|e| ConfigError::Invalid(format!("invalid POLLS_HOST '{raw}': {e}")))?,
        };
        let port = match var("POLLS_PORT") {
            None => 3000,
            Some(raw) => raw.parse::<u16>()
                .map_err(|e| ConfigError::Invalid(format!("invalid POLLS_PORT '{raw}': {e}")))?,
        };
        let db_pool_size = match var("POLLS_DB_POOL_SIZE") {
            None => 5,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::Invalid(
                        format!("POLLS_DB_POOL_SIZE must be a positive integer, got '{raw}'")
                    ));
                },
                Ok(n) => n,
            },
        };

        Ok(Config {
            database_url: var("DATABASE_URL"),
            host,
            port,
            db_pool_size,
            static_dir: var("POLLS_STATIC_DIR").map(PathBuf::from),
            log_level: var("POLLS_LOG").unwrap_or_else(|| String::from("info")),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
