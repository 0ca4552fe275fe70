//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::transaction::with_transaction;
use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Writes are atomic: a failed create, update or delete leaves no trace.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users, ordered by id
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Create a new user; the store assigns `id` and `created_at`
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Find user by ID
    async fn get(&self, id: i32) -> AppResult<User>;

    /// Apply the fields present in `changes`
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Permanently remove a user
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Check connectivity of the backing store
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        with_transaction(&self.db, |txn| {
            Box::pin(async move {
                let active_model = ActiveModel {
                    id: NotSet,
                    username: Set(new_user.username),
                    email: Set(new_user.email),
                    created_at: Set(Utc::now()),
                };

                let model = active_model.insert(txn).await?;
                tracing::debug!(user_id = model.id, "User created");
                Ok(User::from(model))
            })
        })
        .await
    }

    async fn get(&self, id: i32) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        with_transaction(&self.db, |txn| {
            Box::pin(async move {
                let existing = UserEntity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_not_found()?;

                if changes.is_empty() {
                    return Ok(User::from(existing));
                }

                let mut active: ActiveModel = existing.into();
                if let Some(username) = changes.username {
                    active.username = Set(username);
                }
                if let Some(email) = changes.email {
                    active.email = Set(email);
                }

                let model = active.update(txn).await?;
                tracing::debug!(user_id = model.id, "User updated");
                Ok(User::from(model))
            })
        })
        .await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        with_transaction(&self.db, |txn| {
            Box::pin(async move {
                let result = UserEntity::delete_by_id(id).exec(txn).await?;

                if result.rows_affected == 0 {
                    return Err(AppError::NotFound);
                }

                tracing::debug!(user_id = id, "User deleted");
                Ok(())
            })
        })
        .await
    }

    async fn ping(&self) -> AppResult<()> {
        crate::infra::ping(&self.db).await.map_err(AppError::from)
    }
}
