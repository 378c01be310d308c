use std::sync::Arc;

use crate::error::{UserError, UserKey, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserChanges, UserSummary};
use crate::repository::UserRepository;
use crate::validation::{self, normalize_email};

/// Service layer for User business logic.
///
/// Owns the write path that keeps emails unique: every create and email
/// change looks up the normalized address first, and the repository's own
/// constraint catches writers that raced past that lookup.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let new_user = validation::validate_new(&input)?;
        self.repository.create(new_user).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::not_found_id(id))
    }

    /// Get a user by email, matched case-insensitively
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<User> {
        let normalized = normalize_email(email);
        let found = self.repository.get_by_email(&normalized).await?;
        found.ok_or(UserError::NotFound(UserKey::Email(normalized)))
    }

    /// List all users, oldest first
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Update the fields present in `input`
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        if !self.repository.exists(id).await? {
            return Err(UserError::not_found_id(id));
        }

        if let Some(raw) = input.email.as_deref() {
            let email = normalize_email(raw);
            if let Some(owner) = self.repository.get_by_email(&email).await? {
                if owner.id != id {
                    return Err(UserError::DuplicateEmail(email));
                }
            }
        }

        let changes = validation::validate(UserChanges::from(input))?;
        self.repository.update(id, changes).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        if !self.repository.exists(id).await? {
            return Err(UserError::not_found_id(id));
        }

        // Someone else may have deleted it since the check.
        if !self.repository.delete(id).await? {
            return Err(UserError::not_found_id(id));
        }

        Ok(())
    }

    /// Count and average age over all users
    pub async fn summary(&self) -> UserResult<UserSummary> {
        let users = self.repository.list().await?;
        Ok(UserSummary::from_users(users))
    }
}
