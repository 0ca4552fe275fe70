//! Domain-level errors.
//!
//! Raised when user input breaks a rule of the `User` model, before any
//! store is involved.

use thiserror::Error;

use crate::constants::MSG_USERNAME_EMAIL_REQUIRED;

/// Rule violations on user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username or email missing on creation
    #[error("{}", MSG_USERNAME_EMAIL_REQUIRED)]
    MissingFields,

    /// A field is longer than its column allows
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
