use core_config::{ConfigError, FromEnv, env_flag, env_parse_or, env_required};
use sea_orm::ConnectOptions;
use std::time::Duration;

/// Pool settings for a PostgreSQL connection.
///
/// | Variable | Default |
/// |---|---|
/// | `DATABASE_URL` | required |
/// | `DB_MAX_CONNECTIONS` | 20 |
/// | `DB_MIN_CONNECTIONS` | 1 |
/// | `DB_CONNECT_TIMEOUT_SECS` | 8 |
/// | `DB_ACQUIRE_TIMEOUT_SECS` | 8 |
/// | `DB_IDLE_TIMEOUT_SECS` | 600 |
/// | `DB_MAX_LIFETIME_SECS` | 1800 |
/// | `DB_SQLX_LOGGING` | false |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    /// Log every statement through sqlx.
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
            acquire_timeout: Duration::from_secs(8),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
            sqlx_logging: false,
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(env_required("DATABASE_URL")?);
        let secs = |key: &str, default: Duration| {
            env_parse_or(key, default.as_secs()).map(Duration::from_secs)
        };

        let config = Self {
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: secs("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
            acquire_timeout: secs("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout)?,
            idle_timeout: secs("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
            max_lifetime: secs("DB_MAX_LIFETIME_SECS", defaults.max_lifetime)?,
            sqlx_logging: env_flag("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
            ..defaults
        };

        if config.min_connections > config.max_connections {
            return Err(ConfigError::ParseError {
                key: "DB_MIN_CONNECTIONS".to_string(),
                details: format!(
                    "{} exceeds DB_MAX_CONNECTIONS ({})",
                    config.min_connections, config.max_connections
                ),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "postgresql://localhost/userbase";

    #[test]
    fn test_postgres_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("DB_MAX_CONNECTIONS", None),
                ("DB_MIN_CONNECTIONS", None),
                ("DB_CONNECT_TIMEOUT_SECS", None),
                ("DB_SQLX_LOGGING", None),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config, PostgresConfig::new(URL));
            },
        );
    }

    #[test]
    fn test_postgres_config_from_env_custom() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("DB_MAX_CONNECTIONS", Some("50")),
                ("DB_MIN_CONNECTIONS", Some("10")),
                ("DB_CONNECT_TIMEOUT_SECS", Some("15")),
                ("DB_SQLX_LOGGING", Some("true")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.min_connections, 10);
                assert_eq!(config.connect_timeout, Duration::from_secs(15));
                assert!(config.sqlx_logging);
            },
        );
    }

    #[test]
    fn test_postgres_config_requires_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = PostgresConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_postgres_config_rejects_invalid_pool() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("DB_MAX_CONNECTIONS", Some("invalid")),
            ],
            || {
                let err = PostgresConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
            },
        );

        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("DB_MAX_CONNECTIONS", Some("2")),
                ("DB_MIN_CONNECTIONS", Some("5")),
            ],
            || {
                let err = PostgresConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MIN_CONNECTIONS"));
            },
        );
    }

    #[test]
    fn test_with_pool_size() {
        let config = PostgresConfig::new(URL).with_pool_size(8, 2);
        assert_eq!((config.max_connections, config.min_connections), (8, 2));
        assert_eq!(config.url(), URL);
    }
}
