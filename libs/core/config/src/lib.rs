//! Environment-driven configuration shared by every userbase crate.
//!
//! Each config struct implements [`FromEnv`] and reads its own variables,
//! so binaries compose them without a central settings file.

pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

pub use server::ServerConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment environment, selected by `APP_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than `production` (case-insensitive) is development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version reported by `/health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Configuration that can be loaded from environment variables.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parses `key` into `T`, falling back to `default` when the variable is unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Reads a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("USERBASE_TEST_VAR", Some("set"), || {
            assert_eq!(env_or_default("USERBASE_TEST_VAR", "fallback"), "set");
        });
        temp_env::with_var_unset("USERBASE_TEST_VAR", || {
            assert_eq!(env_or_default("USERBASE_TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("USERBASE_REQUIRED", || {
            let err = env_required("USERBASE_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("USERBASE_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("USERBASE_NUM", Some(" 42 "), || {
            assert_eq!(env_parse_or("USERBASE_NUM", 7u32).unwrap(), 42);
        });
        temp_env::with_var_unset("USERBASE_NUM", || {
            assert_eq!(env_parse_or("USERBASE_NUM", 7u32).unwrap(), 7);
        });
        temp_env::with_var("USERBASE_NUM", Some("many"), || {
            let err = env_parse_or("USERBASE_NUM", 7u32).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "USERBASE_NUM"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("USERBASE_FLAG", Some("FALSE"), || {
            assert!(!env_flag("USERBASE_FLAG", true).unwrap());
        });
        temp_env::with_var("USERBASE_FLAG", Some("1"), || {
            assert!(env_flag("USERBASE_FLAG", false).unwrap());
        });
        temp_env::with_var_unset("USERBASE_FLAG", || {
            assert!(env_flag("USERBASE_FLAG", true).unwrap());
        });
        temp_env::with_var("USERBASE_FLAG", Some("maybe"), || {
            assert!(env_flag("USERBASE_FLAG", true).is_err());
        });
    }
}
