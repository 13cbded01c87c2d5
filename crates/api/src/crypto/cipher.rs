//! AES-256-GCM-SIV encryption and decryption of individual string fields.
//!
//! Every call draws a fresh salt and nonce, so encrypting the same plaintext
//! twice under the same [`FieldKey`] yields two different strings. The salt
//! selects the per-value data key (see [`FieldKey::derive`]); the nonce feeds
//! the AEAD. Both travel inside the encoded value, so decryption needs only
//! the field secret.

use std::str::FromStr;

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use super::key::{DataKey, FieldKey};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the per-value key-derivation salt.
pub const SALT_LEN: usize = 16;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every encrypted field value.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed, encrypted field value.
///
/// The string representation is
/// `v1.<base64url(salt)>.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    /// Raw salt bytes used to derive the data key.
    pub salt: [u8; SALT_LEN],
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedField {
    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.salt),
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for EncryptedField {
    type Err = CipherError;

    /// Parse an encrypted field string back into an [`EncryptedField`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string does not match the
    /// expected `v1.<salt>.<nonce>.<ciphertext>` structure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, '.').collect();
        if parts.len() != 4 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let salt = decode_fixed::<SALT_LEN>(parts[1])?;
        let nonce = decode_fixed::<NONCE_LEN>(parts[2])?;
        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[3])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(part: &str) -> Result<[u8; N], CipherError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| CipherError::InvalidFormat)?;
    bytes.try_into().map_err(|_| CipherError::InvalidFormat)
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A field secret was configured as an empty string.
    #[error("field encryption key must not be empty")]
    EmptyKey,

    /// A derived data key has the wrong length.
    #[error("invalid data key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM-SIV encryption or decryption failed (wrong key or tampered data).
    #[error("aead operation failed")]
    AeadFailure,

    /// The encrypted field string does not match the expected format.
    #[error("invalid encrypted field format")]
    InvalidFormat,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted field is not valid UTF-8")]
    InvalidUtf8,
}

/// Encrypt a plaintext string field, returning its self-contained string form.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (unreachable
/// with a well-formed derived key).
pub fn encrypt(plaintext: &str, key: &FieldKey) -> Result<String, CipherError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let data_key = key.derive(&salt)?;
    let ciphertext = build_cipher(&data_key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(EncryptedField {
        salt,
        nonce,
        ciphertext,
    }
    .to_string_repr())
}

/// Decrypt a string produced by [`encrypt`] back to plaintext.
///
/// # Errors
///
/// Returns [`CipherError::InvalidFormat`] for a malformed value,
/// [`CipherError::AeadFailure`] if authentication fails (wrong key or tampered
/// data) and [`CipherError::InvalidUtf8`] if the plaintext is not UTF-8.
pub fn decrypt(ciphertext: &str, key: &FieldKey) -> Result<String, CipherError> {
    let field: EncryptedField = ciphertext.parse()?;
    let data_key = key.derive(&field.salt)?;
    let plaintext = build_cipher(&data_key)?
        .decrypt(Nonce::from_slice(&field.nonce), field.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)?;
    String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
}

fn build_cipher(key: &DataKey) -> Result<Aes256GcmSiv, CipherError> {
    Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| CipherError::InvalidKeyLength)
}
