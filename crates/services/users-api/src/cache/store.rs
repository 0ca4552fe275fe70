//! Cache store abstraction and its Redis implementation.

use async_trait::async_trait;
use std::time::Duration;

use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client, RedisError,
};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Cache failures. Callers are expected to treat these as a miss.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value cache with expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value (`GET`)
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value that expires after `ttl_seconds` (`SETEX`)
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Remove a value (`DEL`)
    async fn del(&self, key: &str) -> Result<(), CacheError>;

    /// Liveness probe (`PING`)
    async fn ping(&self) -> Result<(), CacheError>;
}

/// Connection attempts made per operation while Redis is down
const CONNECT_RETRIES: usize = 1;

/// Upper bound on a single connection attempt
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Redis cache wrapper.
///
/// The connection is established on first use and then shared, so the
/// service can start while Redis is still unreachable.
pub struct RedisCache {
    client: Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Create a cache client without connecting.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    /// Create a cache client and attempt an initial connection.
    ///
    /// A failed attempt is logged; the next operation retries.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        debug!("Connecting to Redis at {}", url);
        let cache = Self::new(url)?;
        match cache.connection().await {
            Ok(_) => tracing::info!("Redis cache connected"),
            Err(e) => warn!("Redis unavailable at startup, continuing without cache: {}", e),
        }
        Ok(cache)
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| {
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(CONNECT_RETRIES)
                    .set_connection_timeout(CONNECT_TIMEOUT);
                ConnectionManager::new_with_config(self.client.clone(), config)
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(RedisCache::new("not a url").is_err());
    }

    #[test]
    fn test_new_does_not_connect() {
        // Nothing listens on port 1; construction must still succeed.
        assert!(RedisCache::new("redis://127.0.0.1:1").is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_redis_reports_error() {
        let cache = RedisCache::new("redis://127.0.0.1:1").unwrap();
        assert!(cache.ping().await.is_err());
        assert!(cache.get("users:all").await.is_err());
    }
}
