//! Application state for dependency injection.

use std::sync::Arc;

use crate::cache::{CacheStore, UserListCache};
use crate::repository::UserRepository;

/// Application state shared across handlers.
///
/// Built once at startup from explicit dependencies; tests swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub user_list: UserListCache,
    pub cache: Arc<dyn CacheStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheStore>,
        list_ttl_seconds: u64,
    ) -> Self {
        let user_list = UserListCache::new(cache.clone(), users.clone(), list_ttl_seconds);
        Self {
            users,
            user_list,
            cache,
        }
    }
}
