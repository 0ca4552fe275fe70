//! Shared test infrastructure for integration tests.
//!
//! Uses an in-memory SQLite store through SeaORM and an in-memory cache, so
//! no Postgres or Redis is needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use common::DatabaseConfig;
use users_api_lib::cache::{CacheError, CacheStore};
use users_api_lib::infra::Database;
use users_api_lib::repository::UserStore;
use users_api_lib::routes::create_router;
use users_api_lib::state::AppState;

/// Connect to a fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_seconds: 5,
    };

    Database::connect(&config)
        .await
        .expect("Failed to open in-memory database")
}

/// In-memory cache store. Expiry is recorded but not enforced.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, u64)>>,
    broken: AtomicBool,
    gets: AtomicUsize,
}

impl MemoryCache {
    /// Make every subsequent call fail as if Redis were down.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    /// Number of cache reads attempted so far
    pub fn reads(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("Connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.check()
    }
}

/// A router wired to test doubles, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<UserStore>,
    pub cache: Arc<MemoryCache>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = test_database().await;
        let store = Arc::new(UserStore::new(db.get_connection()));
        let cache = Arc::new(MemoryCache::default());

        let state = AppState::new(store.clone(), cache.clone(), domain::USERS_CACHE_TTL_SECONDS);

        Self {
            router: create_router(state),
            store,
            cache,
        }
    }

    /// Send a request and decode the JSON response body (`Value::Null` if empty).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
