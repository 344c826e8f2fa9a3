//! Note store: the reference list plus the decrypted projection over it.
//!
//! The decrypted listing is not state. It is recomputed on demand by
//! fetching and decrypting every reference concurrently; one bad note
//! degrades to an error placeholder and never takes its siblings down.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;

use crate::content::{validate_cid, ContentStore};
use crate::crypto::{EncryptionKey, PayloadCipher};
use crate::enhance::Enhancement;
use crate::error::{NotesError, Result};
use crate::payload::{DecryptedNote, NotePayload, ERROR_PLACEHOLDER};

pub mod refs;

pub use refs::{JsonFileRefStore, MemoryRefStore, NoteRef, RefStore, REFS_FILE_NAME};

/// One entry of the decrypted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NoteView {
    Decrypted(DecryptedNote),
    Failed {
        cid: String,
        #[serde(rename = "error")]
        reason: String,
    },
}

impl NoteView {
    pub fn cid(&self) -> &str {
        match self {
            NoteView::Decrypted(note) => &note.cid,
            NoteView::Failed { cid, .. } => cid,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NoteView::Failed { .. })
    }

    /// Text to display: the plaintext, or the error placeholder.
    pub fn content(&self) -> &str {
        match self {
            NoteView::Decrypted(note) => &note.content,
            NoteView::Failed { .. } => ERROR_PLACEHOLDER,
        }
    }
}

/// Ordered note references backed by a content store.
pub struct NoteStore<C, R> {
    content: C,
    refs_store: R,
    refs: Vec<NoteRef>,
}

impl<C: ContentStore, R: RefStore> NoteStore<C, R> {
    /// Open the store, loading persisted references.
    pub fn open(content: C, refs_store: R) -> Result<Self> {
        let refs = refs_store.load()?;
        Ok(Self {
            content,
            refs_store,
            refs,
        })
    }

    pub fn refs(&self) -> &[NoteRef] {
        &self.refs
    }

    pub fn content_store(&self) -> &C {
        &self.content
    }

    /// Append a reference and persist the full list.
    pub fn add(&mut self, cid: &str) -> Result<()> {
        validate_cid(cid)?;
        self.refs.push(NoteRef::new(cid));
        self.refs_store.save(&self.refs)
    }

    /// Remove every reference to `cid` and persist.
    ///
    /// Returns `false` (and writes nothing) when the CID is not present.
    pub fn remove(&mut self, cid: &str) -> Result<bool> {
        let before = self.refs.len();
        self.refs.retain(|r| r.cid != cid);
        if self.refs.len() == before {
            return Ok(false);
        }
        self.refs_store.save(&self.refs)?;
        Ok(true)
    }

    /// Encrypt, upload and record a new note. Returns its CID.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::InvalidInput` for blank text; upload errors
    /// propagate and leave the reference list untouched.
    pub async fn save_note(
        &mut self,
        key: &EncryptionKey,
        text: &str,
        enhancement: Option<&Enhancement>,
    ) -> Result<String> {
        if text.trim().is_empty() {
            return Err(NotesError::InvalidInput("Note text cannot be empty".to_string()));
        }

        let sealed = PayloadCipher::new(key).seal(text)?;
        let payload = NotePayload::new(sealed, enhancement, Utc::now());
        let cid = self.content.upload(&payload.to_json()?).await?;
        self.add(&cid)?;
        tracing::info!(%cid, "saved note");
        Ok(cid)
    }

    /// Fetch, parse and decrypt a single note.
    pub async fn open_note(&self, cid: &str, cipher: &PayloadCipher) -> Result<DecryptedNote> {
        let raw = self.content.fetch(cid).await?;
        let payload = NotePayload::from_json(&raw)?;
        let content = payload.open(cipher)?;
        Ok(DecryptedNote::from_payload(cid, payload, content))
    }

    /// Decrypt every referenced note, concurrently, in reference order.
    ///
    /// Always returns one entry per reference.
    pub async fn list_decrypted(&self, key: &EncryptionKey) -> Vec<NoteView> {
        let cipher = PayloadCipher::new(key);
        let cipher = &cipher;

        let pending = self.refs.iter().map(|note_ref| async move {
            match self.open_note(&note_ref.cid, cipher).await {
                Ok(note) => NoteView::Decrypted(note),
                Err(err) => {
                    tracing::error!(cid = %note_ref.cid, error = %err, "failed to decrypt note");
                    NoteView::Failed {
                        cid: note_ref.cid.clone(),
                        reason: err.to_string(),
                    }
                }
            }
        });

        join_all(pending).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::InMemoryContentStore;

    fn key() -> EncryptionKey {
        EncryptionKey::from_signature("0xabc123").unwrap()
    }

    #[test]
    fn test_note_view_serializes_with_status_tag() {
        let failed = NoteView::Failed {
            cid: "QmA".to_string(),
            reason: "Not found: QmA".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"status": "failed", "cid": "QmA", "error": "Not found: QmA"})
        );

        let decrypted = NoteView::Decrypted(DecryptedNote {
            cid: "QmB".to_string(),
            content: "hello".to_string(),
            summary: String::new(),
            tone: String::new(),
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
        });
        let value = serde_json::to_value(&decrypted).unwrap();
        assert_eq!(value["status"], "decrypted");
        assert_eq!(value["content"], "hello");
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let mut store =
            NoteStore::open(InMemoryContentStore::new(), MemoryRefStore::new()).unwrap();
        store.add("QmA").unwrap();
        store.add("QmB").unwrap();

        assert_eq!(store.refs(), &[NoteRef::new("QmA"), NoteRef::new("QmB")]);
        assert_eq!(store.refs_store.snapshot(), store.refs().to_vec());
        assert_eq!(store.refs_store.writes(), 2);
    }

    #[tokio::test]
    async fn test_remove_absent_cid_is_noop() {
        let refs = MemoryRefStore::with_refs(vec![NoteRef::new("QmA")]);
        let mut store = NoteStore::open(InMemoryContentStore::new(), refs).unwrap();

        assert!(!store.remove("QmZ").unwrap());

        assert_eq!(store.refs_store.writes(), 0);
        assert_eq!(store.refs_store.snapshot(), vec![NoteRef::new("QmA")]);
    }

    #[tokio::test]
    async fn test_remove_drops_every_duplicate() {
        let refs = MemoryRefStore::with_refs(vec![
            NoteRef::new("QmA"),
            NoteRef::new("QmB"),
            NoteRef::new("QmA"),
        ]);
        let mut store = NoteStore::open(InMemoryContentStore::new(), refs).unwrap();

        assert!(store.remove("QmA").unwrap());

        assert_eq!(store.refs_store.snapshot(), vec![NoteRef::new("QmB")]);
    }

    #[tokio::test]
    async fn test_save_then_list_round_trip() {
        let mut store =
            NoteStore::open(InMemoryContentStore::new(), MemoryRefStore::new()).unwrap();
        let cid = store.save_note(&key(), "hello world", None).await.unwrap();

        let views = store.list_decrypted(&key()).await;
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].cid(), cid);
        assert_eq!(views[0].content(), "hello world");
    }

    #[tokio::test]
    async fn test_save_rejects_blank_text() {
        let mut store =
            NoteStore::open(InMemoryContentStore::new(), MemoryRefStore::new()).unwrap();
        let result = store.save_note(&key(), "  \n", None).await;
        assert!(matches!(result, Err(NotesError::InvalidInput(_))));
        assert!(store.refs().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_records_nothing() {
        let content = InMemoryContentStore::new();
        content.set_reject_uploads(true);
        let mut store = NoteStore::open(content, MemoryRefStore::new()).unwrap();

        let result = store.save_note(&key(), "hello", None).await;

        assert!(matches!(result, Err(NotesError::UploadFailed { .. })));
        assert!(store.refs().is_empty());
        assert_eq!(store.refs_store.writes(), 0);
    }

    #[tokio::test]
    async fn test_wrong_key_degrades_to_placeholder() {
        let mut store =
            NoteStore::open(InMemoryContentStore::new(), MemoryRefStore::new()).unwrap();
        store.save_note(&key(), "secret", None).await.unwrap();

        let other = EncryptionKey::from_signature("0xother").unwrap();
        let views = store.list_decrypted(&other).await;

        assert_eq!(views.len(), 1);
        assert!(views[0].is_error());
        assert_eq!(views[0].content(), ERROR_PLACEHOLDER);
    }
}
