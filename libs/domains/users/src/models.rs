use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored user. `email` is unique and kept lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier, never reused
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// `null` when not provided
    #[schema(example = 36)]
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "crate::validation::check_email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(custom(function = "crate::validation::check_name"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    #[serde(default)]
    pub age: Option<i32>,
}

/// Request body for `PATCH /users/{id}`. Omitted fields are left unchanged.
///
/// `age` is three-state: omitted keeps the stored age, `null` clears it and a
/// number replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "crate::validation::check_email"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(custom(function = "crate::validation::check_name"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i32>, example = 37)]
    pub age: Option<Option<i32>>,
}

/// Maps a present field to `Some`, so `null` arrives as `Some(None)`.
/// Only called when the key is in the payload; `default` covers a missing key.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A validated, normalized record ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
}

/// A partial set of user fields; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    /// `Some(None)` clears the stored age
    pub age: Option<Option<i32>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.age.is_none()
    }

    /// Applies the present fields to `user`. Timestamps are the caller's job.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

impl From<UpdateUser> for UserChanges {
    fn from(input: UpdateUser) -> Self {
        Self {
            email: input.email,
            name: input.name,
            age: input.age,
        }
    }
}

/// Aggregate view returned by `GET /users/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub total: usize,
    /// Mean over users with a non-zero age; `0` when there are none
    pub average_age: f64,
    pub users: Vec<User>,
}

impl UserSummary {
    pub fn from_users(users: Vec<User>) -> Self {
        let (sum, counted) = users
            .iter()
            .filter_map(|u| u.age)
            .filter(|&age| age != 0)
            .fold((0i64, 0u32), |(sum, n), age| (sum + i64::from(age), n + 1));

        let average_age = if counted == 0 {
            0.0
        } else {
            sum as f64 / f64::from(counted)
        };

        Self {
            total: users.len(),
            average_age,
            users,
        }
    }
}

/// Confirmation body for `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: i32, age: Option<i32>) -> User {
        let now = Utc::now();
        User {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            age,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_serializes_camel_case_with_null_age() {
        let json = serde_json::to_value(user(7, None)).unwrap();

        assert_eq!(json["id"], 7);
        assert!(json["age"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn update_user_distinguishes_null_from_missing_age() {
        let cleared: UpdateUser = serde_json::from_value(json!({"name": "Zed", "age": null})).unwrap();
        assert_eq!(cleared.age, Some(None));
        assert_eq!(UserChanges::from(cleared).name.as_deref(), Some("Zed"));

        let missing: UpdateUser = serde_json::from_value(json!({"name": "Zed"})).unwrap();
        assert_eq!(missing.age, None);

        let set: UpdateUser = serde_json::from_value(json!({"age": 40})).unwrap();
        assert_eq!(set.age, Some(Some(40)));
    }

    #[test]
    fn update_user_validates_only_a_present_age() {
        let cleared = UpdateUser {
            age: Some(None),
            ..Default::default()
        };
        assert!(cleared.validate().is_ok());

        let too_old = UpdateUser {
            age: Some(Some(151)),
            ..Default::default()
        };
        assert!(too_old.validate().unwrap_err().field_errors().contains_key("age"));
    }

    #[test]
    fn update_user_serializes_null_age_to_clear() {
        let json = serde_json::to_value(UpdateUser {
            age: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, json!({"age": null}));

        let json = serde_json::to_value(UpdateUser::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn create_user_dto_rules() {
        let ok = CreateUser {
            email: "  ADA@example.com ".into(),
            name: " Ada ".into(),
            age: Some(0),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateUser {
            email: "bad".into(),
            name: " A ".into(),
            age: Some(151),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn empty_update_is_valid_and_empty() {
        let input = UpdateUser::default();
        assert!(input.validate().is_ok());
        assert!(UserChanges::from(input).is_empty());
    }

    #[test]
    fn apply_changes_only_touches_present_fields() {
        let mut u = user(1, Some(40));
        UserChanges {
            name: Some("Renamed".into()),
            ..Default::default()
        }
        .apply_to(&mut u);

        assert_eq!(u.name, "Renamed");
        assert_eq!(u.email, "user1@example.com");
        assert_eq!(u.age, Some(40));
    }

    #[test]
    fn apply_changes_can_clear_age() {
        let mut u = user(1, Some(40));
        UserChanges {
            age: Some(None),
            ..Default::default()
        }
        .apply_to(&mut u);

        assert_eq!(u.age, None);
    }

    #[test]
    fn summary_averages_present_ages() {
        let summary = UserSummary::from_users(vec![user(1, Some(25)), user(2, Some(30)), user(3, None)]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_age, 27.5);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["averageAge"], 27.5);
    }

    #[test]
    fn summary_skips_zero_ages() {
        let summary = UserSummary::from_users(vec![user(1, Some(0)), user(2, Some(30))]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.average_age, 30.0);

        assert_eq!(UserSummary::from_users(vec![user(1, Some(0))]).average_age, 0.0);
    }

    #[test]
    fn summary_without_ages_is_zero() {
        assert_eq!(UserSummary::from_users(vec![user(1, None)]).average_age, 0.0);
        assert_eq!(UserSummary::from_users(vec![]).total, 0);
    }
}
