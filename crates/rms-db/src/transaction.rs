//! Transactional write coordinator.
//!
//! [`with_transaction`] runs a caller-supplied unit of work against one
//! database transaction: commit when the work succeeds, roll back when it
//! fails. The error returned by the work is always the one the caller sees;
//! a failed rollback is logged and never replaces it.
//!
//! If the request future is dropped while the work is in flight, the
//! [`sqlx::Transaction`] is dropped with it and sqlx rolls it back before the
//! connection returns to the pool, so no transaction is ever left open.
//!
//! ```ignore
//! let user_id = with_transaction(&state.db, "create_user", move |tx| {
//!     Box::pin(async move {
//!         let id = insert_user(tx, &dto).await?;
//!         insert_addresses(tx, id, &dto.addresses).await?;
//!         Ok(id)
//!     })
//! })
//! .await?;
//! ```

use anyhow::Context;
use futures::future::BoxFuture;
use rms_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};

/// Transaction handle passed to the unit of work.
pub type Tx = Transaction<'static, Postgres>;

/// Runs `work` inside a single transaction.
///
/// `operation` names the write in log lines; it must not contain user data.
///
/// # Errors
///
/// - the begin failure, if no transaction could be started
/// - the error returned by `work` (after rolling back)
/// - the commit failure, if `work` succeeded but the commit did not
pub async fn with_transaction<T, F>(pool: &PgPool, operation: &str, work: F) -> Result<T, AppError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut Tx) -> BoxFuture<'c, Result<T, AppError>> + Send,
{
    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(operation, error = %e, "Cannot begin database transaction");
        AppError::database(anyhow::Error::new(e).context("Failed to begin transaction"))
    })?;

    tracing::debug!(operation, "Starting database transaction");
    let outcome = work(&mut tx).await;

    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .inspect_err(|e| {
                    tracing::error!(operation, error = %e, "Cannot commit database transaction")
                })
                .context("Failed to commit transaction")?;
            tracing::debug!(operation, "Committed database transaction");
            Ok(value)
        }
        Err(err) => {
            tracing::info!(operation, status = %err.status.as_u16(), "Rolling back database transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    operation,
                    error = %rollback_err,
                    "Cannot rollback database transaction"
                );
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn create_table(pool: &PgPool) {
        sqlx::query("CREATE TABLE items (id INTEGER PRIMARY KEY)")
            .execute(pool)
            .await
            .unwrap();
    }

    async fn count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert(tx: &mut Tx, id: i32) -> Result<(), AppError> {
        sqlx::query("INSERT INTO items (id) VALUES ($1)")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    #[sqlx::test]
    async fn test_commits_on_success(pool: PgPool) {
        create_table(&pool).await;

        let value = with_transaction(&pool, "insert_two", |tx| {
            Box::pin(async move {
                insert(tx, 1).await?;
                insert(tx, 2).await?;
                Ok(42)
            })
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(count(&pool).await, 2);
    }

    #[sqlx::test]
    async fn test_rolls_back_and_returns_work_error(pool: PgPool) {
        create_table(&pool).await;

        let err = with_transaction(&pool, "insert_then_fail", |tx| {
            Box::pin(async move {
                insert(tx, 1).await?;
                Err::<(), _>(AppError::conflict("Item already exists".to_string()))
            })
        })
        .await
        .unwrap_err();

        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(err.error.to_string(), "Item already exists");
        assert_eq!(count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_store_failure_rolls_back_earlier_writes(pool: PgPool) {
        create_table(&pool).await;

        let err = with_transaction(&pool, "duplicate_insert", |tx| {
            Box::pin(async move {
                insert(tx, 1).await?;
                insert(tx, 1).await
            })
        })
        .await
        .unwrap_err();

        assert!(err.is_server_error());
        assert_eq!(count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_cancelled_work_is_not_committed(pool: PgPool) {
        create_table(&pool).await;

        let work = with_transaction(&pool, "never_finishes", |tx| {
            Box::pin(async move {
                insert(tx, 1).await?;
                std::future::pending::<()>().await;
                Ok(())
            })
        });

        assert!(tokio::time::timeout(Duration::from_millis(200), work).await.is_err());
        assert_eq!(count(&pool).await, 0);
    }
}
