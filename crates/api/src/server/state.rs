//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::UserCipher;
use crate::store::UserStore;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying key material.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the `users` table.
    pub store: UserStore,
    /// Encryption boundary holding the two field keys.
    pub cipher: Arc<UserCipher>,
}

impl AppState {
    /// Create a new [`AppState`] from an open store and a configured cipher.
    pub fn new(store: UserStore, cipher: UserCipher) -> Self {
        Self {
            store,
            cipher: Arc::new(cipher),
        }
    }
}
