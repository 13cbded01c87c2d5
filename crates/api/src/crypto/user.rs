//! [`UserCipher`]: the encryption boundary around a user record.

use common::protocol::UserRecord;

use super::cipher::{decrypt, encrypt, CipherError};
use super::key::FieldKey;
use crate::store::{SealedUser, UserRow};

/// Holds one independent key per encrypted column.
///
/// Built once from configuration at startup and shared read-only between
/// request handlers.
#[derive(Debug)]
pub struct UserCipher {
    user_name: FieldKey,
    password: FieldKey,
}

impl UserCipher {
    /// Build the boundary from the two configured secrets.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EmptyKey`] if either secret is empty.
    pub fn new(user_name_key: &str, password_key: &str) -> Result<Self, CipherError> {
        Ok(Self {
            user_name: FieldKey::new(user_name_key)?,
            password: FieldKey::new(password_key)?,
        })
    }

    /// Encrypt both fields of a write request before they reach the store.
    pub fn seal(&self, user_name: &str, password: &str) -> Result<SealedUser, CipherError> {
        Ok(SealedUser {
            user_name: encrypt(user_name, &self.user_name)?,
            password: encrypt(password, &self.password)?,
        })
    }

    /// Decrypt both fields of a stored row for the single-record read path.
    pub fn open(&self, row: UserRow) -> Result<UserRecord, CipherError> {
        Ok(UserRecord {
            id: row.id,
            user_name: decrypt(&row.user_name, &self.user_name)?,
            password: decrypt(&row.password, &self.password)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
