//! Users API configuration.

use std::env;

use common::{CacheConfig, DatabaseConfig, ServiceConfig};

/// Users API configuration.
#[derive(Debug, Clone, Default)]
pub struct UsersApiConfig {
    /// Bind address and logging
    pub service: ServiceConfig,
    /// Persistence store connection
    pub database: DatabaseConfig,
    /// Cache store connection
    pub cache: CacheConfig,
}

impl UsersApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service = ServiceConfig::default();
        let database = DatabaseConfig::default();
        let cache = CacheConfig::default();

        Self {
            service: ServiceConfig {
                host: env::var("HOST").unwrap_or(service.host),
                port: parse_var("PORT").unwrap_or(service.port),
                log_level: env::var("RUST_LOG").unwrap_or(service.log_level),
                ..service
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(database.min_connections),
                ..database
            },
            cache: CacheConfig {
                host: env::var("REDIS_HOST").unwrap_or(cache.host),
                port: parse_var("REDIS_PORT").unwrap_or(cache.port),
                list_ttl_seconds: parse_var("USERS_CACHE_TTL_SECONDS")
                    .unwrap_or(cache.list_ttl_seconds),
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
