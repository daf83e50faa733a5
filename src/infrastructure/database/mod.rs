//! SQLite-backed ledger store
//!
//! One pooled connection is checked out per transactional or serialized
//! operation and released on every exit path. These two wrappers are the only
//! acquisition primitives; no call site manages connections by hand.

use std::str::FromStr;
use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::SqliteConnection;

use crate::application::errors::StoreError;

/// Pooled store handle. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database (creating the file if missing) and prepare the
    /// schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Connect(format!("invalid database url: {}", e)))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// In-memory store for tests and throwaway runs. Capped at one
    /// connection: each pooled connection would otherwise open its own
    /// private database.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Connect(format!("invalid database url: {}", e)))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        let ddl = [
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                snowflake TEXT UNIQUE NOT NULL,
                balance_wallet INTEGER NOT NULL DEFAULT 0 CHECK (balance_wallet >= 0),
                balance_bank INTEGER NOT NULL DEFAULT 0 CHECK (balance_bank >= 0),
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        ];
        for statement in ddl {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run `op` inside one transaction on one pooled connection. Commits on
    /// `Ok`, rolls back on `Err`; a rollback failure is logged and the
    /// original error wins. The connection is released on every path.
    pub async fn transaction<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, StoreError>>
            + Send,
    {
        let mut tx = self.pool.begin().await?;
        match op(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Run `op` on one pooled connection without opening a transaction. The
    /// connection is released on every path.
    pub async fn serialize<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, StoreError>>
            + Send,
    {
        let mut conn = self.pool.acquire().await?;
        op(&mut conn).await
    }
}
