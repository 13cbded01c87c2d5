//! Relational persistence of user records over SQLite via sqlx.
//!
//! The store only ever sees [`SealedUser`] values on the write path, so
//! plaintext never reaches a SQL statement. Existence is not checked before
//! `UPDATE`/`DELETE`; callers get the affected row count instead.

pub mod row;

pub use row::{SealedUser, UserRow};

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

const SELECT_USERS: &str = "SELECT id, userName, password, createdAt, updatedAt FROM users";

/// Handle to the `users` table. Cheap to clone (the pool is `Arc` internally).
#[derive(Clone, Debug)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Open (or create) the database at `database_url` and run all pending
    /// migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        if database_url.contains(":memory:") {
            return Self::in_memory().await;
        }
        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;
        Self::migrate(pool).await
    }

    /// A private in-memory database.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a new record, stamping both timestamps. Returns the new id.
    pub async fn insert(&self, user: &SealedUser) -> Result<i64, StoreError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (userName, password, createdAt, updatedAt) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.user_name)
        .bind(&user.password)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// All records, ordered by id, with fields as stored.
    pub async fn list(&self) -> Result<Vec<UserRow>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// The record with the given id, if any.
    pub async fn find(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Overwrite both fields of the record at `id` and refresh `updatedAt`.
    ///
    /// Returns the number of rows affected (0 when `id` does not exist).
    pub async fn update(&self, id: i64, user: &SealedUser) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE users SET userName = ?, password = ?, updatedAt = ? WHERE id = ?")
                .bind(&user.user_name)
                .bind(&user.password)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Remove the record at `id`. Returns the number of rows affected.
    pub async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Round-trip a trivial statement to confirm the store is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection; later calls fail with a pool error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
