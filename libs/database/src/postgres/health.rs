use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use crate::common::DatabaseError;

/// Readiness probe: `SELECT 1` through the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    db.execute_unprepared("SELECT 1")
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn healthy_connection_passes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn failing_connection_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([sea_orm::DbErr::Custom("connection reset".into())])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
