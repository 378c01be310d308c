use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_flag, env_parse_or, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::fmt;
use std::str::FromStr;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Backing store for users, selected by `USER_STORE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStore {
    Postgres,
    /// Process-local; data is lost on restart
    Memory,
}

impl FromStr for UserStore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(UserStore::Postgres),
            "memory" | "in-memory" => Ok(UserStore::Memory),
            other => Err(format!("unknown user store '{}', expected postgres or memory", other)),
        }
    }
}

impl fmt::Display for UserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStore::Postgres => write!(f, "postgres"),
            UserStore::Memory => write!(f, "memory"),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: UserStore,
    /// Present only for [`UserStore::Postgres`]
    pub database: Option<PostgresConfig>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let store = env_parse_or("USER_STORE", UserStore::Postgres)?;

        let database = match store {
            UserStore::Postgres => Some(PostgresConfig::from_env()?), // Requires DATABASE_URL
            UserStore::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            database,
            run_migrations: env_flag("RUN_MIGRATIONS", true)?,
        })
    }
}
