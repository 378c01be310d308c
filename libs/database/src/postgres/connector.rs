use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Opens a pool with the default [`PostgresConfig`] settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(PostgresConfig::new(database_url).into_connect_options()).await
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connects with exponential backoff, for startups that race the database
/// container.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: RetryConfig,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();

    retry_with_backoff(|| connect_with_options(options.clone()), &retry_config)
        .await
        .map_err(|source| DatabaseError::ConnectionFailed {
            attempts: retry_config.attempts(),
            source,
        })
}

/// Applies every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
