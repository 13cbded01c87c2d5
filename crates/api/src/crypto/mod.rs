//! Field-level encryption of user records.
//!
//! This module is intentionally free of HTTP dependencies. It provides the
//! low-level encrypt/decrypt operations and the [`UserCipher`] boundary used
//! by the request handlers.
//!
//! # Ciphertext format
//!
//! ```text
//! v1.<base64url-no-pad(salt)>.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix enables future algorithm migration without breaking
//! existing ciphertext.

pub mod cipher;
pub mod key;
pub mod user;

pub use user::UserCipher;
