//! Configuration loading and representation.
//!
//! Everything comes from environment variables (a `.env` file is loaded by the
//! binary before this runs). Unset variables fall back to defaults with an
//! `info` log; set-but-invalid variables are a hard error.

use std::{fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Apply `migrations/0001_catalog.sql` on start-up.
    pub apply_schema: bool,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory catalog.
    pub database: Option<DatabaseConfig>,
    /// Upper bound for every individual store call.
    pub query_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the
    /// process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_persistent: bool = load(&lookup, "USE_PERSISTENT_STORES", false)?;

        let database = if use_persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            Some(DatabaseConfig {
                database_url,
                max_connections: load(&lookup, "DATABASE_POOL_SIZE", 10)?,
                acquire_timeout: Duration::from_millis(load(
                    &lookup,
                    "DATABASE_ACQUIRE_TIMEOUT_MS",
                    3000,
                )?),
                apply_schema: load(&lookup, "APPLY_SCHEMA", false)?,
            })
        } else {
            None
        };

        Ok(Self {
            host: load(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: load(&lookup, "PORT", 3000)?,
            database,
            query_timeout: Duration::from_millis(load(&lookup, "QUERY_TIMEOUT_MS", 5000)?),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
