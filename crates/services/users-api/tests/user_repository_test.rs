//! Integration tests for UserStore.
//!
//! These tests run against an in-memory SQLite database with the real
//! migrations applied.

mod support;

use std::sync::Arc;

use common::AppError;
use domain::{NewUser, UserChanges};
use support::test_database;
use users_api_lib::repository::{UserRepository, UserStore};

async fn store() -> Arc<UserStore> {
    let db = test_database().await;
    Arc::new(UserStore::new(db.get_connection()))
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser::new(username, email).expect("valid test user")
}

#[tokio::test]
async fn test_create_and_get() {
    let repo = store().await;

    let created = repo
        .create(new_user("alice", "a@x.com"))
        .await
        .expect("Failed to create user");
    assert!(created.id > 0);
    assert_eq!(created.username, "alice");

    let found = repo.get(created.id).await.expect("User not found");
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_get_not_found() {
    let repo = store().await;

    let result = repo.get(42).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let repo = store().await;

    for (name, email) in [("c", "c@x.com"), ("a", "a@x.com"), ("b", "b@x.com")] {
        repo.create(new_user(name, email)).await.unwrap();
    }

    let users = repo.list().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert!(users.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_unique_violation_is_validation_error_and_persists_nothing() {
    let repo = store().await;
    repo.create(new_user("alice", "a@x.com")).await.unwrap();

    let result = repo.create(new_user("alice", "other@x.com")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_to_taken_email_is_validation_error() {
    let repo = store().await;
    repo.create(new_user("alice", "a@x.com")).await.unwrap();
    let bob = repo.create(new_user("bob", "b@x.com")).await.unwrap();

    let changes = UserChanges::new(None, Some("a@x.com".into())).unwrap();
    let result = repo.update(bob.id, changes).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    assert_eq!(repo.get(bob.id).await.unwrap().email, "b@x.com");
}

#[tokio::test]
async fn test_update_applies_only_present_fields() {
    let repo = store().await;
    let alice = repo.create(new_user("alice", "a@x.com")).await.unwrap();

    let changes = UserChanges::new(None, Some("new@x.com".into())).unwrap();
    let updated = repo.update(alice.id, changes).await.unwrap();

    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.email, "new@x.com");
    assert_eq!(updated.created_at, alice.created_at);
}

#[tokio::test]
async fn test_update_not_found() {
    let repo = store().await;

    let changes = UserChanges::new(Some("bob".into()), None).unwrap();
    let result = repo.update(7, changes).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_failed_update_is_rolled_back() {
    let repo = store().await;
    repo.create(new_user("alice", "a@x.com")).await.unwrap();
    let bob = repo.create(new_user("bob", "b@x.com")).await.unwrap();

    let changes = UserChanges::new(Some("alice".into()), Some("bob2@x.com".into())).unwrap();
    assert!(matches!(
        repo.update(bob.id, changes).await,
        Err(AppError::Validation(_))
    ));

    let unchanged = repo.get(bob.id).await.unwrap();
    assert_eq!(unchanged, bob);
}

#[tokio::test]
async fn test_delete_removes_row_and_id_is_not_reused() {
    let repo = store().await;
    let alice = repo.create(new_user("alice", "a@x.com")).await.unwrap();

    repo.delete(alice.id).await.expect("Failed to delete user");
    assert!(matches!(repo.get(alice.id).await, Err(AppError::NotFound)));
    assert!(matches!(repo.delete(alice.id).await, Err(AppError::NotFound)));

    let next = repo.create(new_user("alice", "a@x.com")).await.unwrap();
    assert!(next.id > alice.id);
}

#[tokio::test]
async fn test_ping() {
    let repo = store().await;
    assert!(repo.ping().await.is_ok());
}
