//! Application state management.
//!
//! The state is cloned into every stateful router (cheap: the connection is
//! a pool handle).

use database::postgres::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL pool; `None` when users are kept in memory
    pub db: Option<DatabaseConnection>,
}
