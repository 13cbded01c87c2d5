//! Row types exchanged with the `users` table.

use chrono::{DateTime, Utc};
use common::protocol::UserRecord;

/// A `users` row exactly as persisted: both text fields are ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    /// Passes the stored ciphertext through untouched (list view).
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Both fields of a write request after encryption; the only shape the store
/// accepts for inserts and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedUser {
    pub user_name: String,
    pub password: String,
}
