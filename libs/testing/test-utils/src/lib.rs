//! Shared test utilities
//!
//! - `TestRedis`: Redis Stack container (search module included) with
//!   automatic cleanup (feature: "redis", on by default)
//! - `TestDataBuilder`: deterministic per-test names so tests sharing a
//!   container do not collide
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestRedis};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_redis_test() {
//!     let redis = TestRedis::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_redis_test");
//!     let index = builder.name("index", "main");
//!     let conn = redis.connection_manager().await;
//! }
//! ```

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Deterministic test data derived from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let a = TestDataBuilder::from_test_name("test_upload");
    /// let b = TestDataBuilder::from_test_name("test_upload");
    /// assert_eq!(a.name("doc", "a"), b.name("doc", "a"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Key prefix ending in `:`, for isolating one test's documents.
    pub fn key_prefix(&self, prefix: &str) -> String {
        format!("test:{}:{}:", prefix, self.seed)
    }
}
