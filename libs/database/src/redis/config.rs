#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Redis connection settings
///
/// ```ignore
/// use database::redis::RedisConfig;
///
/// let config = RedisConfig::new("redis://127.0.0.1:6379").with_database(2);
/// assert_eq!(config.connection_url(), "redis://127.0.0.1:6379/2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedisConfig {
    /// Redis connection URL, credentials included if any
    pub url: String,

    /// Logical database number, appended to the URL when set
    pub database: Option<u8>,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: None,
        }
    }

    pub fn with_database(mut self, database: u8) -> Self {
        self.database = Some(database);
        self
    }

    /// URL handed to `redis::Client::open`.
    ///
    /// A database number already present in the URL path wins over `database`.
    pub fn connection_url(&self) -> String {
        let trimmed = self.url.trim_end_matches('/');
        let has_path = trimmed
            .split_once("://")
            .map(|(_, rest)| rest.contains('/'))
            .unwrap_or(false);

        match self.database {
            Some(db) if !has_path => format!("{}/{}", trimmed, db),
            _ => self.url.clone(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REDIS_URL)
    }
}

/// Environment variables:
/// - `REDIS_URL` or `REDIS_HOST` (default `redis://localhost:6379`)
/// - `REDIS_DATABASE` (optional, 0-255)
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_HOST"))
            .unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        let database = match std::env::var("REDIS_DATABASE") {
            Ok(_) => Some(env_parse_or("REDIS_DATABASE", 0u8)?),
            Err(_) => None,
        };

        Ok(Self { url, database })
    }
}
