//! Persisted note references.
//!
//! The reference list is the only durable record of which CIDs belong to
//! the user. There is no reverse index on the storage network: losing this
//! list orphans the remote ciphertext permanently.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::write_atomic;

/// File name of the reference list inside the data directory.
pub const REFS_FILE_NAME: &str = "notes.json";

/// A saved note, by content identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    pub cid: String,
}

impl NoteRef {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }
}

/// Storage for the reference list.
///
/// Implementations rewrite the whole list on every save.
pub trait RefStore: Send + Sync {
    /// Load the list. A store that has never been written is empty.
    fn load(&self) -> Result<Vec<NoteRef>>;

    /// Replace the persisted list.
    fn save(&self, refs: &[NoteRef]) -> Result<()>;
}

/// Reference list stored as a JSON array (`[{"cid": "..."}]`).
#[derive(Debug, Clone)]
pub struct JsonFileRefStore {
    path: PathBuf,
}

impl JsonFileRefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RefStore for JsonFileRefStore {
    fn load(&self) -> Result<Vec<NoteRef>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, refs: &[NoteRef]) -> Result<()> {
        let json = serde_json::to_vec(refs)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

/// Reference list held in memory, with a write counter for tests.
#[derive(Debug, Default)]
pub struct MemoryRefStore {
    refs: Mutex<Vec<NoteRef>>,
    writes: Mutex<usize>,
}

impl MemoryRefStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refs(refs: Vec<NoteRef>) -> Self {
        Self {
            refs: Mutex::new(refs),
            writes: Mutex::new(0),
        }
    }

    /// How many times `save` has been called.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Vec<NoteRef> {
        self.refs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RefStore for MemoryRefStore {
    fn load(&self) -> Result<Vec<NoteRef>> {
        Ok(self.snapshot())
    }

    fn save(&self, refs: &[NoteRef]) -> Result<()> {
        *self.refs.lock().unwrap_or_else(PoisonError::into_inner) = refs.to_vec();
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
