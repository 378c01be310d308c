use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges};

/// Record store for users.
///
/// Implementations must reject a second live user with the same email
/// atomically (`UserError::DuplicateEmail`), even when the service's own
/// lookup raced with another writer. Emails arrive already normalized.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, assigning `id` and both timestamps.
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Exact match on the stored (lowercase) email.
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, ascending by id.
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Applies the present fields and refreshes `updated_at`.
    /// Fails with `NotFound` if `id` does not exist.
    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> UserResult<bool>;

    async fn exists(&self, id: i32) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// In-memory store for development and tests.
///
/// The uniqueness check and the write happen under one write lock, which
/// gives the same guarantee as the database's unique index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.email_taken(&user.email, None) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserError::Internal("user id space exhausted".to_string()))?;
        let now = Utc::now();
        let created = User {
            id,
            email: user.email,
            name: user.name,
            age: user.age,
            created_at: now,
            updated_at: now,
        };

        store.last_id = id;
        store.users.insert(id, created.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User> {
        let mut store = self.store.write().await;

        if let Some(email) = &changes.email {
            if store.email_taken(email, Some(id)) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| UserError::not_found_id(id))?;

        changes.apply_to(user);
        user.updated_at = Utc::now();

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let removed = self.store.write().await.users.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }

    async fn exists(&self, id: i32) -> UserResult<bool> {
        Ok(self.store.read().await.users.contains_key(&id))
    }
}
