use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::fmt;
use thiserror::Error;

use crate::validation::ValidationError;

/// The key a failed lookup was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Id(i32),
    Email(String),
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKey::Id(id) => write!(f, "ID {}", id),
            UserKey::Email(email) => write!(f, "email {}", email),
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User with {0} not found")]
    NotFound(UserKey),

    /// Carries the conflicting (normalized) email.
    #[error("User with this email already exists")]
    DuplicateEmail(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub fn not_found_id(id: i32) -> Self {
        UserError::NotFound(UserKey::Id(id))
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => AppError::BadRequest(e.to_string()),
            err @ UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            err @ UserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn messages() {
        assert_eq!(
            UserError::not_found_id(5).to_string(),
            "User with ID 5 not found"
        );
        assert_eq!(
            UserError::NotFound(UserKey::Email("a@b.co".into())).to_string(),
            "User with email a@b.co not found"
        );
        assert_eq!(
            UserError::DuplicateEmail("a@b.co".into()).to_string(),
            "User with this email already exists"
        );
        assert_eq!(
            UserError::from(ValidationError::AgeOutOfRange).to_string(),
            "Age must be between 0 and 150"
        );
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (UserError::from(ValidationError::InvalidEmail), StatusCode::BAD_REQUEST),
            (UserError::not_found_id(1), StatusCode::NOT_FOUND),
            (UserError::DuplicateEmail("x@y.z".into()), StatusCode::CONFLICT),
            (
                UserError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
