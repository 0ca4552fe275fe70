//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length (matches the `users.username` column)
pub const MAX_USERNAME_LENGTH: usize = 80;

/// Maximum email length (matches the `users.email` column)
pub const MAX_EMAIL_LENGTH: usize = 120;

/// Message returned when a create request lacks a username or email
pub const MSG_USERNAME_EMAIL_REQUIRED: &str = "Username and email required";

// =============================================================================
// Caching
// =============================================================================

/// Cache key holding the serialized "list all users" result
pub const USERS_CACHE_KEY: &str = "users:all";

/// Expiry of the cached user listing in seconds
pub const USERS_CACHE_TTL_SECONDS: u64 = 60;
