//! AES-256-GCM payload cipher with a PBKDF2-derived key.
//!
//! The layout matches WebCrypto so notes written by other clients decrypt
//! here: the 16-byte tag is appended to the ciphertext, the whole thing is
//! standard base64, and the 12-byte IV travels separately.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::key::EncryptionKey;
use crate::error::{NotesError, Result};

/// Fixed PBKDF2 salt. Shared by every note ever written; see the module
/// docs in `crypto` before touching it.
pub const PBKDF2_SALT: &[u8] = b"salt";

/// PBKDF2 iteration count. Must match the value used at encryption time.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the AES-GCM initialization vector in bytes.
pub const IV_LENGTH: usize = 12;

/// Length of the derived AES key in bytes (256 bits).
const KEY_LENGTH: usize = 32;

/// Ciphertext plus the IV it was sealed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedText {
    /// Base64 of ciphertext || tag
    pub ciphertext: String,
    pub iv: [u8; IV_LENGTH],
}

/// AES-256-GCM cipher holding a key derived once from a password.
///
/// Deriving is deliberately slow (100k PBKDF2 rounds); build one
/// `PayloadCipher` per session and reuse it for every note.
pub struct PayloadCipher {
    cipher: Aes256Gcm,
}

impl PayloadCipher {
    /// Derive the AES key for a session key.
    pub fn new(key: &EncryptionKey) -> Self {
        Self::from_password(key.as_str())
    }

    /// Derive the AES key for an arbitrary password.
    pub fn from_password(password: &str) -> Self {
        let key_bytes = derive_aes_key(password);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes[..]));
        Self { cipher }
    }

    /// Encrypt text under a fresh random IV.
    pub fn seal(&self, plaintext: &str) -> Result<SealedText> {
        let iv = random_iv()?;
        self.seal_with_iv(plaintext, iv)
    }

    /// Encrypt text under a caller-supplied IV.
    ///
    /// Reusing an IV with the same key breaks GCM; only tests and fixtures
    /// should call this directly.
    pub fn seal_with_iv(&self, plaintext: &str, iv: [u8; IV_LENGTH]) -> Result<SealedText> {
        let encrypted = self
            .cipher
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|e| NotesError::Crypto(format!("AES-GCM encryption failed: {}", e)))?;

        Ok(SealedText {
            ciphertext: STANDARD.encode(encrypted),
            iv,
        })
    }

    /// Decrypt base64 ciphertext with the IV stored next to it.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::DecryptionFailed` if:
    /// - The ciphertext is not valid base64
    /// - Authentication fails (wrong key or corrupted data)
    /// - The plaintext is not valid UTF-8
    pub fn open(&self, ciphertext: &str, iv: &[u8; IV_LENGTH]) -> Result<String> {
        let encrypted = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| NotesError::DecryptionFailed(format!("Invalid base64: {}", e)))?;

        let decrypted = self
            .cipher
            .decrypt(Nonce::from_slice(iv), encrypted.as_slice())
            .map_err(|_| {
                NotesError::DecryptionFailed(
                    "Authentication failed (wrong key or corrupted data)".to_string(),
                )
            })?;

        String::from_utf8(decrypted)
            .map_err(|e| NotesError::DecryptionFailed(format!("Plaintext is not UTF-8: {}", e)))
    }
}

/// Encrypt note text with a password.
///
/// Derives the key on every call. Prefer `PayloadCipher` for batches.
///
/// # Examples
///
/// ```
/// use ipnotes_core::crypto::{decrypt, encrypt};
///
/// let sealed = encrypt("hello world", "password").unwrap();
/// let plain = decrypt(&sealed.ciphertext, &sealed.iv, "password").unwrap();
/// assert_eq!(plain, "hello world");
/// ```
pub fn encrypt(plaintext: &str, password: &str) -> Result<SealedText> {
    PayloadCipher::from_password(password).seal(plaintext)
}

/// Decrypt note text with a password.
pub fn decrypt(ciphertext: &str, iv: &[u8; IV_LENGTH], password: &str) -> Result<String> {
    PayloadCipher::from_password(password).open(ciphertext, iv)
}

fn derive_aes_key(password: &str) -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        PBKDF2_SALT,
        PBKDF2_ITERATIONS,
        &mut key[..],
    );
    key
}

fn random_iv() -> Result<[u8; IV_LENGTH]> {
    let mut iv = [0u8; IV_LENGTH];
    getrandom::getrandom(&mut iv)
        .map_err(|e| NotesError::Crypto(format!("Failed to generate IV: {}", e)))?;
    Ok(iv)
}
