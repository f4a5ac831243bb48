//! Redis Stack test container.

use redis::Client;
use redis::aio::ConnectionManager;
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::redis::{REDIS_PORT, RedisStack};

/// Redis Stack container, removed when dropped.
///
/// Redis Stack bundles the search module, so `FT.CREATE` / `FT.SEARCH` work.
///
/// ```no_run
/// use test_utils::TestRedis;
///
/// # async fn example() {
/// let redis = TestRedis::new().await;
/// let mut conn = redis.connection_manager().await;
/// let pong: String = redis::cmd("PING").query_async(&mut conn).await.unwrap();
/// assert_eq!(pong, "PONG");
/// # }
/// ```
pub struct TestRedis {
    #[allow(dead_code)]
    container: ContainerAsync<RedisStack>,
    client: Client,
    pub connection_string: String,
}

impl TestRedis {
    pub async fn new() -> Self {
        let container = RedisStack::default()
            .start()
            .await
            .expect("Failed to start Redis Stack container");

        let host_port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{}", host_port);
        let client = Client::open(connection_string.clone()).expect("Failed to create Redis client");

        tracing::info!(port = host_port, "Test Redis Stack ready");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Auto-reconnecting connection, the same kind the service uses.
    pub async fn connection_manager(&self) -> ConnectionManager {
        ConnectionManager::new(self.client.clone())
            .await
            .expect("Failed to connect to Redis")
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestRedis {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Redis container");
    }
}
