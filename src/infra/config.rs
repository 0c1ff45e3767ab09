//! Centralized configuration (environment variables + defaults).
//!
//! `.env` is honoured: call [`Config::from_env`], which runs `dotenv` first.

use anyhow::{anyhow, bail, Context};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Required for [`StorageBackend::Postgres`]. No default, for safety.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'", other),
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set");
        }

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let secret_key = lookup("SECRET_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("SECRET_KEY must be set"))?;

        let access_token_expire_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(v) => v
                .parse::<i64>()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid integer")?,
            None => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };
        if access_token_expire_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:3000")?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            storage_backend,
            database_url,
            db_max_connections,
            secret_key,
            access_token_expire_minutes,
            bind_addr,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://localhost/marikaya"),
            ("SECRET_KEY", "k"),
        ])
        .unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Postgres);
        assert_eq!(cfg.access_token_expire_minutes, 30);
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config_from(&[("SECRET_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let cfg = config_from(&[("STORAGE_BACKEND", "memory"), ("SECRET_KEY", "k")]).unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Memory);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn secret_key_is_required() {
        let err = config_from(&[("STORAGE_BACKEND", "memory")]).unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let err = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("SECRET_KEY", "k"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "soon"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
    }

    #[test]
    fn unknown_backend_is_an_error() {
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite"), ("SECRET_KEY", "k")]).is_err());
    }
}
