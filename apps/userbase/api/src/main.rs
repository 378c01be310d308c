use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(store = %config.store, "Selected user store");

    let db = match &config.database {
        Some(database) => {
            let db = connect_from_config_with_retry(database.clone(), RetryConfig::default())
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if config.run_migrations {
                run_migrations::<Migrator>(&db, config.app.name).await?;
            } else {
                info!("RUN_MIGRATIONS=false, skipping migrations");
            }

            Some(db)
        }
        None => {
            warn!("Users are kept in memory and will be lost on restart");
            None
        }
    };

    let state = AppState { config, db };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check that pings the database
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting userbase API with graceful shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Userbase API shutdown complete");
    Ok(())
}
