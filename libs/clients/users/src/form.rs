use domain_users::{CreateUser, UpdateUser, User};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::client::ClientResult;
use crate::store::UserStore;

/// Create/edit form for a user.
///
/// Checks only what a form can check before submitting; the server still
/// normalizes and enforces its own rules (including uniqueness).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email must be valid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(range(min = 1, message = "Age must be positive"))]
    #[serde(default)]
    pub age: Option<i32>,
}

impl UserForm {
    /// Prefills the form for editing `user`.
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age,
        }
    }

    pub fn into_create(self) -> Result<CreateUser, ValidationErrors> {
        self.validate()?;
        Ok(CreateUser {
            email: self.email,
            name: self.name,
            age: self.age,
        })
    }

    /// Sends every field; the server treats unchanged values as no-ops and
    /// an empty age clears the stored one.
    pub fn into_update(self) -> Result<UpdateUser, ValidationErrors> {
        self.validate()?;
        Ok(UpdateUser {
            email: Some(self.email),
            name: Some(self.name),
            age: Some(self.age),
        })
    }

    /// Creates a user, or updates `editing` when set.
    pub async fn submit(self, store: &mut UserStore, editing: Option<i32>) -> ClientResult<User> {
        match editing {
            Some(id) => store.update_user(id, &self.into_update()?).await,
            None => store.create_user(&self.into_create()?).await,
        }
    }
}
