//! JSON output helpers for the CLI.
//!
//! Shapes here are part of the scripting surface: `list --json` and
//! `show --json` print one object per note with a `status` field.

use ipnotes_core::payload::{DecryptedNote, ERROR_PLACEHOLDER};
use ipnotes_core::store::NoteRef;
use ipnotes_core::NoteView;

/// Convert a listing entry to JSON. Failed entries also carry the
/// placeholder text under `content`.
pub fn note_view_json(view: &NoteView) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(view)?;
    if view.is_error() {
        if let Some(object) = value.as_object_mut() {
            object.insert("content".to_string(), ERROR_PLACEHOLDER.into());
        }
    }
    Ok(value)
}

/// Convert a decrypted note to JSON.
pub fn note_json(note: &DecryptedNote) -> serde_json::Result<serde_json::Value> {
    note_view_json(&NoteView::Decrypted(note.clone()))
}

/// Convert the reference list to a JSON array of CIDs.
pub fn refs_json(refs: &[NoteRef]) -> serde_json::Value {
    serde_json::Value::Array(
        refs.iter()
            .map(|r| serde_json::Value::String(r.cid.clone()))
            .collect(),
    )
}
