//! Cache layer - Redis client and the cache-aside user listing.
//!
//! The cache is never authoritative: every failure here degrades to
//! querying the persistence store.

mod store;
mod user_list;

pub use store::{CacheError, CacheStore, RedisCache};
pub use user_list::UserListCache;
