//! Cryptographic operations for ipnotes.
//!
//! - **key**: wallet signature -> SHA-256 hex password (`EncryptionKey`)
//! - **cipher**: PBKDF2-HMAC-SHA256 + AES-256-GCM over note text
//!
//! ## Security Model
//!
//! The only secret is the wallet signature over a fixed unlock message. It is
//! hashed into a password that never leaves memory. The PBKDF2 salt is a
//! fixed literal shared by every user and session: security rests entirely
//! on the entropy of the signature. The salt cannot change without a
//! migration, or every previously saved note becomes unreadable.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading note contents from the public storage network
//! - Tampering with stored ciphertext (GCM authentication)
//!
//! We do NOT defend against:
//! - A compromised wallet or signer
//! - Correlating notes by CID or timing
//! - Losing the local reference file (CIDs are not recoverable)

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, PayloadCipher, SealedText, IV_LENGTH};
pub use key::{unlock_message, EncryptionKey};
