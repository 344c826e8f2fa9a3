//! Signature-derived encryption keys.
//!
//! The wallet signs `"Unlock notes for <address>"`; the lowercase hex SHA-256
//! of the signature string becomes the password fed to the payload cipher.
//! Standard `personal_sign` is deterministic, so the same wallet yields the
//! same key in every session.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{NotesError, Result};

/// Prefix of the message the wallet signs to unlock notes.
pub const UNLOCK_MESSAGE_PREFIX: &str = "Unlock notes for ";

/// Build the fixed unlock message for a wallet address.
pub fn unlock_message(address: &str) -> String {
    format!("{}{}", UNLOCK_MESSAGE_PREFIX, address)
}

/// Session encryption key derived from a wallet signature.
///
/// Held only in memory; the digest is zeroized when dropped and never
/// appears in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    digest: String,
}

impl EncryptionKey {
    /// Derive the key from a hex signature string.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::KeyDerivationFailed` if the signature is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipnotes_core::crypto::EncryptionKey;
    ///
    /// let a = EncryptionKey::from_signature("0xabc123").unwrap();
    /// let b = EncryptionKey::from_signature("0xabc123").unwrap();
    /// assert_eq!(a.as_str(), b.as_str());
    /// ```
    pub fn from_signature(signature: &str) -> Result<Self> {
        if signature.trim().is_empty() {
            return Err(NotesError::KeyDerivationFailed(
                "Signature cannot be empty".to_string(),
            ));
        }

        let digest = Sha256::digest(signature.as_bytes());
        Ok(Self {
            digest: hex::encode(digest),
        })
    }

    /// The password used for key derivation in the payload cipher.
    ///
    /// Avoid storing or logging this value.
    pub fn as_str(&self) -> &str {
        &self.digest
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("digest", &"[REDACTED]")
            .finish()
    }
}
