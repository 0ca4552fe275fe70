//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// User domain entity
///
/// `id` and `created_at` are assigned by the store on creation and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    /// Unique login name
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub username: String,
    /// Unique email address
    #[cfg_attr(feature = "openapi", schema(example = "alice@example.com"))]
    pub email: String,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

/// Data required to create a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Build creation data, rejecting blank or over-long fields.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        let email = email.into();

        if username.is_empty() || email.is_empty() {
            return Err(DomainError::MissingFields);
        }
        check_length("username", &username, MAX_USERNAME_LENGTH)?;
        check_length("email", &email, MAX_EMAIL_LENGTH)?;

        Ok(Self { username, email })
    }
}

/// Partial update of a user.
///
/// `None` leaves the stored value untouched. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    /// Build a partial update, dropping empty values and rejecting over-long ones.
    pub fn new(username: Option<String>, email: Option<String>) -> DomainResult<Self> {
        let username = username.filter(|s| !s.is_empty());
        let email = email.filter(|s| !s.is_empty());

        if let Some(ref username) = username {
            check_length("username", username, MAX_USERNAME_LENGTH)?;
        }
        if let Some(ref email) = email {
            check_length("email", email, MAX_EMAIL_LENGTH)?;
        }

        Ok(Self { username, email })
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Reject `value` if it has more than `max` characters.
pub fn check_length(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }
    Ok(())
}
