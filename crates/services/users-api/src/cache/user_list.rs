//! Cache-aside wrapper around the "list all users" query.

use std::sync::Arc;

use tracing::{debug, warn};

use common::AppResult;
use domain::{User, USERS_CACHE_KEY};

use super::store::CacheStore;
use crate::repository::UserRepository;

/// Read-through cache for the user listing, invalidated on every write.
///
/// Cache errors never reach the caller: a failed read is a miss, a failed
/// write or delete is logged and dropped.
#[derive(Clone)]
pub struct UserListCache {
    cache: Arc<dyn CacheStore>,
    repo: Arc<dyn UserRepository>,
    ttl_seconds: u64,
}

impl UserListCache {
    pub fn new(cache: Arc<dyn CacheStore>, repo: Arc<dyn UserRepository>, ttl_seconds: u64) -> Self {
        Self {
            cache,
            repo,
            ttl_seconds,
        }
    }

    /// Return the cached listing, or query the store and cache the result.
    pub async fn list_cached(&self) -> AppResult<Vec<User>> {
        if let Some(users) = self.read().await {
            debug!(key = USERS_CACHE_KEY, "Cache hit");
            return Ok(users);
        }

        let users = self.repo.list().await?;
        self.write(&users).await;
        Ok(users)
    }

    /// Drop the cached listing. Best-effort.
    pub async fn invalidate(&self) {
        if let Err(e) = self.cache.del(USERS_CACHE_KEY).await {
            warn!(key = USERS_CACHE_KEY, "Cache invalidation failed: {}", e);
        }
    }

    async fn read(&self) -> Option<Vec<User>> {
        let json = match self.cache.get(USERS_CACHE_KEY).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!(key = USERS_CACHE_KEY, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = USERS_CACHE_KEY, "Cache read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(users) => Some(users),
            Err(e) => {
                warn!(key = USERS_CACHE_KEY, "Discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    async fn write(&self, users: &[User]) {
        let json = match serde_json::to_string(users) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize user listing: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set_ex(USERS_CACHE_KEY, &json, self.ttl_seconds).await {
            warn!(key = USERS_CACHE_KEY, "Cache write failed: {}", e);
        }
    }
}
