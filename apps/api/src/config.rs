//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads an optional `.env` file first (dotenvy), so both
//! sources end up here.
//!
//! | Variable                      | Default        |
//! |-------------------------------|----------------|
//! | `HTTP_HOST`                   | `0.0.0.0`      |
//! | `HTTP_PORT`                   | `8000`         |
//! | `DATABASE_PATH`               | `./tally.db`   |
//! | `DATABASE_MAX_CONNECTIONS`    | `5`            |
//! | `JWT_SECRET`                  | `change-me`    |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | `60` (max one year) |

use std::env;
use std::path::PathBuf;

/// Signing secret used when `JWT_SECRET` is not set. Fine for local runs,
/// never for a deployment; `main` warns when it is in use.
pub const DEFAULT_JWT_SECRET: &str = "change-me";

/// Longest accepted access token lifetime: one year, in minutes.
pub const MAX_TOKEN_MINUTES: i64 = 525_600;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub http_host: String,

    /// HTTP port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub database_max_connections: u32,

    /// HS256 signing secret
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_host: "0.0.0.0".to_string(),
            http_port: 8000,
            database_path: PathBuf::from("./tally.db"),
            database_max_connections: 5,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            access_token_expire_minutes: 60,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_host: lookup("HTTP_HOST").unwrap_or(defaults.http_host),

            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,

            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),

            access_token_expire_minutes: parse_or(
                &lookup,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
            )?,
        };

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET".to_string()));
        }
        if !(1..=MAX_TOKEN_MINUTES).contains(&config.access_token_expire_minutes) {
            return Err(ConfigError::InvalidValue(
                "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
            ));
        }
        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// True when tokens are signed with the built-in development secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.database_path, PathBuf::from("./tally.db"));
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.access_token_expire_minutes, 60);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "9090"),
            ("DATABASE_PATH", "/tmp/t.db"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "15"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.database_path, PathBuf::from("/tmp/t.db"));
        assert_eq!(config.access_token_expire_minutes, 15);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(ref k)) if k == "HTTP_PORT"
        ));
        assert!(load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]).is_err());
        assert!(load(&[("JWT_SECRET", "")]).is_err());
        assert!(load(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn test_token_lifetime_is_capped() {
        assert_eq!(
            load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "525600")])
                .unwrap()
                .access_token_expire_minutes,
            MAX_TOKEN_MINUTES
        );
        assert!(matches!(
            load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "525601")]),
            Err(ConfigError::InvalidValue(ref k)) if k == "ACCESS_TOKEN_EXPIRE_MINUTES"
        ));
        assert!(load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "9223372036854775807")]).is_err());
    }
}
