//! # Users Client
//!
//! Consumer side of the users API:
//!
//! - **[`UsersClient`]**: typed `reqwest` calls, errors decoded from the
//!   server's [`ErrorResponse`](axum_helpers::ErrorResponse)
//! - **[`LoadingTracker`]**: in-flight request counter shared by every call
//! - **[`UserStore`]**: cached user list kept in step with successful calls
//! - **[`UserForm`]**: create/edit form checks before anything is sent
//!
//! ```rust,no_run
//! use users_client::{UserForm, UserStore, UsersClient};
//!
//! # async fn example() -> users_client::ClientResult<()> {
//! let mut store = UserStore::new(UsersClient::new(UsersClient::DEFAULT_BASE_URL));
//! store.fetch_users().await;
//!
//! let form = UserForm {
//!     email: "ada@example.com".into(),
//!     name: "Ada".into(),
//!     age: Some(36),
//! };
//! form.submit(&mut store, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod form;
pub mod loading;
pub mod store;

pub use client::{ClientError, ClientResult, UsersClient};
pub use form::UserForm;
pub use loading::{LoadingGuard, LoadingTracker};
pub use store::UserStore;
