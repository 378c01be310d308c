//! Users Domain
//!
//! User CRUD whose write path keeps email addresses unique.
//!
//! # Features
//!
//! - Create, read, update (partial), delete and summarize users
//! - Email trimming/lowercasing and format checks, name and age rules
//! - Duplicate-email detection before writing, backed by a store-level
//!   unique constraint for concurrent writers
//! - In-memory and PostgreSQL (SeaORM) repositories
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, OpenAPI docs
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Existence and uniqueness checks, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, request DTOs, summary
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{UserError, UserKey, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUser, MessageResponse, NewUser, UpdateUser, User, UserChanges, UserSummary,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use validation::ValidationError;
