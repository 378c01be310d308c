use domain_users::{CreateUser, UpdateUser, User};
use tracing::warn;

use crate::client::{ClientError, ClientResult, UsersClient};

/// Client-side cache of the user list.
///
/// Mutations update the cache only after the server accepted them. A failed
/// call leaves the list untouched and records a short message in
/// [`error`](Self::error).
#[derive(Debug)]
pub struct UserStore {
    client: UsersClient,
    users: Vec<User>,
    error: Option<String>,
    fetching: bool,
}

impl UserStore {
    pub fn new(client: UsersClient) -> Self {
        Self {
            client,
            users: Vec::new(),
            error: None,
            fetching: false,
        }
    }

    pub fn client(&self) -> &UsersClient {
        &self.client
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while [`fetch_users`](Self::fetch_users) is running.
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Replaces the cache with the server's list. Failures are recorded, not
    /// returned.
    pub async fn fetch_users(&mut self) {
        self.fetching = true;
        self.error = None;

        match self.client.list_users().await {
            Ok(users) => self.users = users,
            Err(e) => {
                warn!(error = %e, "Failed to fetch users");
                self.error = Some("Failed to fetch users".to_string());
            }
        }

        self.fetching = false;
    }

    pub async fn create_user(&mut self, input: &CreateUser) -> ClientResult<User> {
        self.error = None;

        let created = match self.client.create_user(input).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail("Failed to create user", e)),
        };

        self.users.push(created.clone());
        Ok(created)
    }

    pub async fn update_user(&mut self, id: i32, input: &UpdateUser) -> ClientResult<User> {
        self.error = None;

        let updated = match self.client.update_user(id, input).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail("Failed to update user", e)),
        };

        if let Some(slot) = self.users.iter_mut().find(|u| u.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_user(&mut self, id: i32) -> ClientResult<()> {
        self.error = None;

        if let Err(e) = self.client.delete_user(id).await {
            return Err(self.fail("Failed to delete user", e));
        }

        self.users.retain(|u| u.id != id);
        Ok(())
    }

    /// Records `message` and hands the error back to the caller.
    fn fail(&mut self, message: &str, err: ClientError) -> ClientError {
        warn!(error = %err, "{}", message);
        self.error = Some(message.to_string());
        err
    }
}
