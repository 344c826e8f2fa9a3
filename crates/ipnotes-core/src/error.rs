//! Error types for ipnotes core operations.
//!
//! Wallet and upload errors abort the action that raised them. Decryption
//! errors are per-note: the store catches them and degrades only the
//! affected entry. The CLI layer maps these to exit codes and hints.

use thiserror::Error;

/// Result type alias for ipnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type for ipnotes operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// No wallet provider could be reached
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The user declined the connect or sign request
    #[error("Wallet request rejected: {0}")]
    WalletRejected(String),

    /// Encryption error (cipher setup, randomness)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// The signature could not be turned into a key
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// Notes are locked (no encryption key in this session)
    #[error("Notes are locked; sign the unlock message first")]
    Locked,

    /// Pinning service returned a non-success response
    #[error("Upload failed ({status}): {body}")]
    UploadFailed { status: u16, body: String },

    /// Every configured gateway failed for a CID
    #[error("All IPFS gateways failed for CID {cid} ({attempts} attempted)")]
    AllGatewaysFailed { cid: String, attempts: usize },

    /// Authentication or format failure while decrypting a note
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Stored payload could not be parsed
    #[error("Invalid note payload: {0}")]
    InvalidPayload(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl NotesError {
    /// Whether this error came from the wallet boundary.
    pub fn is_wallet_error(&self) -> bool {
        matches!(
            self,
            NotesError::WalletUnavailable(_)
                | NotesError::WalletRejected(_)
                | NotesError::KeyDerivationFailed(_)
                | NotesError::Locked
        )
    }

    /// Whether this error came from talking to the pinning service or gateways.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            NotesError::UploadFailed { .. }
                | NotesError::AllGatewaysFailed { .. }
                | NotesError::Http { .. }
        )
    }
}
