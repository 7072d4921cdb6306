//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: address to bind (default: `127.0.0.1`)
//! - `PORT`: port to bind (default: `3002`)
//! - `DATABASE_URL`: SQLite connection URL (default: `sqlite://todoApplication.db`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size, greater than zero (default: `5`)
//! - `TODO_BOOTSTRAP_SCHEMA`: create the `todo` table when missing (default: `true`)
//! - `RUST_LOG`: log filter, read by the tracing subscriber in `main`
//!
//! A `.env` file in the working directory is loaded first when present.

use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todoApplication.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// A variable was set to a value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub bootstrap_schema: bool,
}

impl DatabaseConfig {
    /// A private in-memory database with the schema in place.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            bootstrap_schema: true,
        }
    }

    /// Every pooled connection to an in-memory database sees its own
    /// database, so such a pool is pinned to one long-lived connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bootstrap_schema: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source. Unset and
    /// blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = ServerConfig::default();

        let port = match var("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => defaults.port,
        };

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(value) => {
                let parsed: u32 = parse_number("DATABASE_MAX_CONNECTIONS", value.clone())?;
                if parsed == 0 {
                    return Err(ConfigError {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                        reason: "must be greater than 0".to_string(),
                    });
                }
                parsed
            }
            None => defaults.database.max_connections,
        };

        let bootstrap_schema = match var("TODO_BOOTSTRAP_SCHEMA") {
            Some(value) => parse_flag("TODO_BOOTSTRAP_SCHEMA", value)?,
            None => defaults.database.bootstrap_schema,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            database: DatabaseConfig {
                url: var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections,
                bootstrap_schema,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError {
        name,
        reason: err.to_string(),
        value,
    })
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            name,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
