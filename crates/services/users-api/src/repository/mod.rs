//! Repository layer for data access.

pub mod entities;
mod transaction;
mod user_repository;

pub use transaction::with_transaction;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
