//! [`FieldKey`]: the process-wide secret for one encrypted column, and the
//! per-value [`DataKey`]s derived from it.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::cipher::{CipherError, KEY_LEN};

type HmacSha256 = Hmac<Sha256>;

/// Secret configured for a single field (`USER_ENCRYPTION_KEY` or
/// `PASSWORD_ENCRYPTION_KEY`).
///
/// The configured string is used as an HMAC key and is never handed to the
/// AEAD directly, so any non-empty length is accepted. When this type is
/// dropped, the secret bytes are overwritten with zeroes.
pub struct FieldKey {
    secret: Box<[u8]>,
}

impl FieldKey {
    /// Wrap a configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EmptyKey`] if `secret` is empty.
    pub fn new(secret: &str) -> Result<Self, CipherError> {
        if secret.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self {
            secret: secret.as_bytes().into(),
        })
    }

    /// Derive the AES-256 key for one encrypted value:
    /// `HMAC-SHA256(key = secret, msg = salt)`.
    pub(crate) fn derive(&self, salt: &[u8]) -> Result<DataKey, CipherError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .map_err(|_| CipherError::InvalidKeyLength)?;
        mac.update(salt);
        let digest = mac.finalize().into_bytes();

        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&digest);
        Ok(DataKey(buf))
    }
}

impl Drop for FieldKey {
    fn drop(&mut self) {
        self.secret.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("FieldKey([REDACTED])")
    }
}

/// Fixed-size AES key derived for a single encrypted value.
///
/// Lives only for the duration of one encrypt or decrypt call and is zeroed
/// on drop.
pub struct DataKey(Box<[u8; KEY_LEN]>);

impl DataKey {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for DataKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(FieldKey::new(""), Err(CipherError::EmptyKey)));
    }

    #[test]
    fn debug_is_redacted() {
        let key = FieldKey::new("super-secret").unwrap();
        let printed = format!("{key:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn derivation_is_stable_per_salt() {
        let key = FieldKey::new("k").unwrap();
        let a = key.derive(b"salt-a").unwrap();
        let b = key.derive(b"salt-a").unwrap();
        let c = key.derive(b"salt-b").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), c.as_bytes());
        assert_eq!(a.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn different_secrets_derive_different_keys() {
        let a = FieldKey::new("one").unwrap().derive(b"salt").unwrap();
        let b = FieldKey::new("two").unwrap().derive(b"salt").unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
