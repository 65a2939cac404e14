use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::db::PoolOptions;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Process settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool: PoolOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080)?;

        let defaults = PoolOptions::default();
        let max_size = parse_or(&lookup, "DB_POOL_MAX_SIZE", defaults.max_size)?;
        let timeout_ms = parse_or(
            &lookup,
            "DB_STATEMENT_TIMEOUT_MS",
            defaults.statement_timeout.as_millis() as u64,
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            pool: PoolOptions {
                max_size,
                statement_timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/retail")]).expect("valid");
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.pool.max_size, 10);
        assert_eq!(cfg.pool.statement_timeout, Duration::from_secs(5));
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(
            config(&[("PORT", "9000")]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://db/retail"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DB_POOL_MAX_SIZE", "4"),
            ("DB_STATEMENT_TIMEOUT_MS", "250"),
        ])
        .expect("valid");
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.pool.max_size, 4);
        assert_eq!(cfg.pool.statement_timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_port_is_reported() {
        let err = config(&[("DATABASE_URL", "postgres://db/retail"), ("PORT", "eighty")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "PORT must be a valid number, got 'eighty'"
        );
    }
}
