//! In-memory content store (for tests and offline use)

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::{validate_cid, ContentStore};
use crate::error::{NotesError, Result};

/// In-memory content store keyed by a BLAKE3-derived identifier.
///
/// Thread-safe via `RwLock`. Nothing is persisted.
#[derive(Default)]
pub struct InMemoryContentStore {
    blobs: RwLock<HashMap<String, String>>,
    reject_uploads: AtomicBool,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier assigned to `content`.
    pub fn cid_for(content: &str) -> String {
        format!("b3{}", blake3::hash(content.as_bytes()).to_hex())
    }

    /// Store content under an explicit identifier, bypassing hashing.
    pub fn insert_raw(&self, cid: &str, content: &str) {
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cid.to_string(), content.to_string());
    }

    /// Make every subsequent upload fail like a rejecting pinning service.
    pub fn set_reject_uploads(&self, reject: bool) {
        self.reject_uploads.store(reject, Ordering::SeqCst);
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn upload(&self, content: &str) -> Result<String> {
        if self.reject_uploads.load(Ordering::SeqCst) {
            return Err(NotesError::UploadFailed {
                status: 503,
                body: "uploads rejected".to_string(),
            });
        }
        let cid = Self::cid_for(content);
        self.insert_raw(&cid, content);
        Ok(cid)
    }

    async fn fetch(&self, cid: &str) -> Result<String> {
        validate_cid(cid)?;
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cid)
            .cloned()
            .ok_or_else(|| NotesError::NotFound(cid.to_string()))
    }
}
