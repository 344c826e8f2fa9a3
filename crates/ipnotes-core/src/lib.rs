//! # ipnotes Core
//!
//! Core library for ipnotes - short text notes encrypted with a key derived
//! from an Ethereum wallet signature and stored on IPFS.
//!
//! This crate provides the domain logic, wire formats, and network clients
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Signature-derived keys and the AES-GCM payload cipher
//! - **payload**: The JSON record uploaded for every note
//! - **content**: Pinning upload and gateway fetch (with fallback)
//! - **store**: Note references and the decrypted listing
//! - **wallet**: Wallet provider boundary (accounts, personal_sign)
//! - **session**: Connected/locked/unlocked session state
//! - **enhance**: Local summary and tone extraction

pub mod content;
pub mod crypto;
pub mod enhance;
pub mod error;
pub mod fallback;
pub mod fs;
pub mod payload;
pub mod session;
pub mod store;
pub mod wallet;

pub use content::ContentStore;
pub use crypto::EncryptionKey;
pub use error::{NotesError, Result};
pub use session::{Session, SessionState};
pub use store::{NoteStore, NoteView};
pub use wallet::WalletProvider;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
