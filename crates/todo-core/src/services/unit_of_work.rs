//! Transaction scoping for a unit of work
//!
//! One transaction per request. Nested operations open a sub-transaction on
//! the same connection, which the driver turns into a savepoint.

use futures::future::BoxFuture;
use sqlx::{Connection, Database, Pool, Transaction};
use tracing::error;

use crate::error::DomainError;

pub struct UnitOfWork<DB: Database> {
    pool: Pool<DB>,
}

impl<DB: Database> Clone for UnitOfWork<DB> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl<DB: Database> UnitOfWork<DB> {
    pub fn new(pool: Pool<DB>) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<Transaction<'static, DB>, DomainError> {
        self.pool.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })
    }

    /// Runs `work` inside a fresh transaction. Commits on `Ok`, rolls back on
    /// `Err` and hands back the original error.
    pub async fn run<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut DB::Connection) -> BoxFuture<'c, Result<T, DomainError>> + Send,
    {
        let mut tx = self.begin().await?;
        let outcome = work(&mut *tx).await;
        finish(tx, outcome).await
    }
}

/// Opens a sub-transaction on a connection that may already be inside one.
pub async fn begin_nested<DB: Database>(
    conn: &mut DB::Connection,
) -> Result<Transaction<'_, DB>, DomainError> {
    Connection::begin(conn).await.map_err(|e| {
        error!("Failed to open nested transaction: {}", e);
        DomainError::DatabaseError(e.to_string())
    })
}

pub async fn commit<DB: Database>(tx: Transaction<'_, DB>) -> Result<(), DomainError> {
    tx.commit().await.map_err(|e| {
        error!("Failed to commit transaction: {}", e);
        DomainError::DatabaseError(e.to_string())
    })
}

/// Rolls back, logging a failure instead of returning it.
pub async fn rollback<DB: Database>(tx: Transaction<'_, DB>) {
    if let Err(e) = tx.rollback().await {
        error!("Failed to roll back transaction: {}", e);
    }
}

/// Commits for `Ok`, rolls back for `Err`. The outcome's error is returned as is.
pub async fn finish<DB: Database, T>(
    tx: Transaction<'_, DB>,
    outcome: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match outcome {
        Ok(value) => {
            commit(tx).await?;
            Ok(value)
        }
        Err(err) => {
            rollback(tx).await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
    use sqlx::{Sqlite, SqliteConnection};

    async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE notes (body TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn insert(conn: &mut SqliteConnection, body: &str) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO notes (body) VALUES ($1)")
            .bind(body)
            .execute(conn)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::DatabaseError(e.to_string()))
    }

    async fn bodies(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar("SELECT body FROM notes ORDER BY body")
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_commits_on_success() {
        let pool = pool().await;
        let uow = UnitOfWork::new(pool.clone());

        let value = uow
            .run(|conn| Box::pin(async move { insert(conn, "kept").await.map(|_| 7) }))
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(bodies(&pool).await, vec!["kept".to_string()]);
    }

    #[tokio::test]
    async fn test_run_rolls_back_and_returns_original_error() {
        let pool = pool().await;
        let uow = UnitOfWork::new(pool.clone());

        let result: Result<(), DomainError> = uow
            .run(|conn| {
                Box::pin(async move {
                    insert(conn, "discarded").await?;
                    Err(DomainError::TaskAlreadyCompleted)
                })
            })
            .await;

        assert!(matches!(result, Err(DomainError::TaskAlreadyCompleted)));
        assert!(bodies(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn test_nested_rollback_keeps_outer_work() {
        let pool = pool().await;
        let uow = UnitOfWork::new(pool.clone());

        uow.run(|conn| {
            Box::pin(async move {
                insert(conn, "outer").await?;
                let mut nested = begin_nested::<Sqlite>(conn).await?;
                insert(&mut nested, "inner").await?;
                rollback(nested).await;
                Ok(())
            })
        })
        .await
        .unwrap();

        assert_eq!(bodies(&pool).await, vec!["outer".to_string()]);
    }

    #[tokio::test]
    async fn test_dropped_transaction_is_rolled_back() {
        let pool = pool().await;
        let uow = UnitOfWork::new(pool.clone());

        {
            let mut tx = uow.begin().await.unwrap();
            insert(&mut tx, "abandoned").await.unwrap();
        }

        assert!(bodies(&pool).await.is_empty());
    }
}
