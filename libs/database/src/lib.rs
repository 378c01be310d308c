//! PostgreSQL connection management for userbase services.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use database::RetryConfig;
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, RetryConfig::default()).await?;
//! postgres::run_migrations::<Migrator>(&db, "userbase_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};
