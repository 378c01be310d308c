//! Normalization and validation of user fields.
//!
//! Everything here is pure. The service calls [`validate`] and
//! [`validate_new`] before touching the store; the request DTOs reuse the
//! same checks through `validator` custom functions so the HTTP layer and the
//! service never disagree about what a valid email or name is.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::{CreateUser, NewUser, UserChanges};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Age must be between 0 and 150")]
    AgeOutOfRange,
}

impl ValidationError {
    /// Stable code used in `validator` error details.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "invalid_email",
            ValidationError::NameTooShort => "name_too_short",
            ValidationError::AgeOutOfRange => "age_out_of_range",
        }
    }
}

impl From<ValidationError> for validator::ValidationError {
    fn from(err: ValidationError) -> Self {
        validator::ValidationError::new(err.code()).with_message(Cow::Owned(err.to_string()))
    }
}

/// Lowercased, trimmed email used as the uniqueness key.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks the trimmed value against the pattern and returns the normalized email.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if EMAIL_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_lowercase())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Returns the trimmed name if it has at least [`MIN_NAME_LEN`] characters.
/// Length is counted in Unicode scalar values, not bytes or UTF-16 units.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() >= MIN_NAME_LEN {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::NameTooShort)
    }
}

pub fn validate_age(age: i32) -> Result<i32, ValidationError> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(ValidationError::AgeOutOfRange)
    }
}

/// Validates and normalizes the present fields of a partial update.
///
/// Fields are checked in the order email, name, age; the first failure wins.
/// Absent fields stay absent and a cleared age passes through unchecked.
pub fn validate(fields: UserChanges) -> Result<UserChanges, ValidationError> {
    Ok(UserChanges {
        email: fields.email.as_deref().map(validate_email).transpose()?,
        name: fields.name.as_deref().map(validate_name).transpose()?,
        age: match fields.age {
            Some(Some(age)) => Some(Some(validate_age(age)?)),
            other => other,
        },
    })
}

/// Validates a full create payload into the record handed to the store.
pub fn validate_new(input: &CreateUser) -> Result<NewUser, ValidationError> {
    Ok(NewUser {
        email: validate_email(&input.email)?,
        name: validate_name(&input.name)?,
        age: input.age.map(validate_age).transpose()?,
    })
}

// Adapters for `#[validate(custom(function = ...))]` on the request DTOs.

pub(crate) fn check_email(raw: &str) -> Result<(), validator::ValidationError> {
    validate_email(raw).map(drop).map_err(Into::into)
}

pub(crate) fn check_name(raw: &str) -> Result<(), validator::ValidationError> {
    validate_name(raw).map(drop).map_err(Into::into)
}
