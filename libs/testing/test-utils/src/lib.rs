//! Test fixtures shared by the userbase crates.
//!
//! - `TestDatabase` (feature `postgres`, on by default): a throwaway Postgres
//!   container with the users schema migrated
//! - `TestDataBuilder`: seeded emails, names and ages
//! - `assertions`: small panicking helpers with readable messages
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let email = builder.email("owner");
//!     let name = builder.name("user", "main");
//! }
//! ```
//!
//! Tests that start a container need Docker; mark them `#[ignore]` so a
//! plain `cargo test` stays hermetic.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded generator for user fields.
///
/// Two builders with the same seed produce the same values, so a failing
/// test sees the same data on every run.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from a hash of `name`, typically the test function's name.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A well-formed, lowercase email unique to this builder and `label`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let email = TestDataBuilder::new(7).email("owner");
    /// assert_eq!(email, "test-owner-7@example.com");
    /// ```
    pub fn email(&self, label: &str) -> String {
        format!("test-{}-{}@example.com", label, self.seed)
    }

    /// `test-{prefix}-{seed}-{suffix}`; always long enough to pass name checks.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// An age in `18..=97`
    pub fn age(&self) -> i32 {
        18 + (self.seed % 80) as i32
    }
}

pub mod assertions {
    /// Unwraps `value`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `email` is stored in its normalized form
    pub fn assert_normalized_email(email: &str, context: &str) {
        assert_eq!(
            email,
            email.trim().to_lowercase(),
            "{}: email {:?} is not normalized",
            context,
            email
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.email("a"), builder2.email("a"));
        assert_eq!(builder1.age(), builder2.age());
        assert_eq!(builder1.name("user", "test"), builder2.name("user", "test"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.email("a"), builder2.email("a"));
    }

    #[test]
    fn test_generated_values_are_valid_users() {
        let builder = TestDataBuilder::from_test_name("valid");

        assertions::assert_normalized_email(&builder.email("main"), "builder email");
        assert!((18..=97).contains(&builder.age()));
        assert!(builder.name("user", "x").len() >= 2);
    }
}
