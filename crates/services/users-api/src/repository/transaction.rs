//! Scoped transactions.
//!
//! A write runs inside [`with_transaction`]: the transaction is begun before
//! the closure runs, committed when it returns `Ok`, and rolled back when it
//! returns `Err`. Dropping an uncommitted `DatabaseTransaction` also rolls it
//! back, so the handle is released on every exit path.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use common::{AppError, AppResult};

/// Execute a closure within a transaction.
pub async fn with_transaction<F, T>(db: &DatabaseConnection, f: F) -> AppResult<T>
where
    F: for<'a> FnOnce(
            &'a DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
        + Send,
    T: Send,
{
    let txn = db.begin().await.map_err(AppError::from)?;

    let outcome = f(&txn).await;

    match outcome {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
