//! Redis connectivity for the docsearch services.
//!
//! # Features
//!
//! - `redis` (default) - Redis connection management and health checks
//! - `config` - `RedisConfig` loading via `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::redis::{RedisConfig, connect_from_config_with_retry};
//!
//! let config = RedisConfig::default();
//! let conn = connect_from_config_with_retry(config, None).await?;
//! ```

pub mod common;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
