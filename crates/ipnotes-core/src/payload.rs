//! Stored note payload (the JSON uploaded to IPFS).
//!
//! This is the contract between writer and reader sessions. Field names,
//! field order, the IV as a plain integer array, and the timestamp format
//! must stay stable or previously saved notes stop decrypting.
//!
//! ```json
//! {"encrypted":"<base64>","iv":[1,2,...,12],"summary":"","tone":"","timestamp":"2024-05-01T12:00:00.000Z"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{PayloadCipher, SealedText, IV_LENGTH};
use crate::enhance::Enhancement;
use crate::error::{NotesError, Result};

/// Placeholder content shown for a note that could not be fetched or decrypted.
pub const ERROR_PLACEHOLDER: &str = "[Error decrypting note]";

/// JSON record stored for every note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    /// Base64 of AES-GCM ciphertext || tag
    pub encrypted: String,
    pub iv: [u8; IV_LENGTH],
    pub summary: String,
    pub tone: String,
    /// ISO-8601, kept as written by the saving client
    pub timestamp: String,
}

impl NotePayload {
    /// Wrap sealed text with optional enhancement metadata.
    pub fn new(
        sealed: SealedText,
        enhancement: Option<&Enhancement>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        let (summary, tone) = enhancement
            .map(|e| (e.display_summary(), e.tone.clone()))
            .unwrap_or_default();
        Self {
            encrypted: sealed.ciphertext,
            iv: sealed.iv,
            summary,
            tone,
            timestamp: format_timestamp(saved_at),
        }
    }

    /// Parse a payload fetched from the content store.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| NotesError::InvalidPayload(e.to_string()))
    }

    /// Serialize for upload.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decrypt the note text.
    pub fn open(&self, cipher: &PayloadCipher) -> Result<String> {
        cipher.open(&self.encrypted, &self.iv)
    }

    /// Parsed timestamp, if it is valid RFC 3339.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// A note after fetch and decryption. Display-only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptedNote {
    pub cid: String,
    pub content: String,
    pub summary: String,
    pub tone: String,
    pub timestamp: String,
}

impl DecryptedNote {
    pub fn from_payload(cid: &str, payload: NotePayload, content: String) -> Self {
        Self {
            cid: cid.to_string(),
            content,
            summary: payload.summary,
            tone: payload.tone,
            timestamp: payload.timestamp,
        }
    }

    /// Parsed timestamp, if it is valid RFC 3339.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sealed() -> SealedText {
        SealedText {
            ciphertext: "26WV+EyfJvfYgh9nM/q2IgFFyLKvJFEhdEC9".to_string(),
            iv: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        }
    }

    fn saved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_wire_format_field_order_and_shape() {
        let payload = NotePayload::new(sealed(), None, saved_at());
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"encrypted":"26WV+EyfJvfYgh9nM/q2IgFFyLKvJFEhdEC9","iv":[1,2,3,4,5,6,7,8,9,10,11,12],"summary":"","tone":"","timestamp":"2024-05-01T12:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_enhancement_populates_summary_and_tone() {
        let enhancement = Enhancement {
            summary: "Great day at the park.".to_string(),
            tone: "POSITIVE".to_string(),
        };
        let payload = NotePayload::new(sealed(), Some(&enhancement), saved_at());
        assert_eq!(payload.summary, "Great day at the park. (Tone: POSITIVE)");
        assert_eq!(payload.tone, "POSITIVE");
    }

    #[test]
    fn test_parse_payload_from_other_client() {
        let raw = r#"{"encrypted":"26WV+EyfJvfYgh9nM/q2IgFFyLKvJFEhdEC9","iv":[1,2,3,4,5,6,7,8,9,10,11,12],"summary":"s","tone":"NEGATIVE","timestamp":"2023-11-02T08:15:30.123Z"}"#;
        let payload = NotePayload::from_json(raw).unwrap();
        assert_eq!(payload.tone, "NEGATIVE");
        assert_eq!(payload.iv[11], 12);
        assert!(payload.saved_at().is_some());

        let password = "3ec42f5dd09802311d4460e6cdf43d736d35d15eb0b90043956ff0bcae71d6e3";
        let cipher = PayloadCipher::from_password(password);
        assert_eq!(payload.open(&cipher).unwrap(), "hello world");
    }

    #[test]
    fn test_iv_with_wrong_length_rejected() {
        let raw = r#"{"encrypted":"AAAA","iv":[1,2,3],"summary":"","tone":"","timestamp":""}"#;
        let result = NotePayload::from_json(raw);
        assert!(matches!(result, Err(NotesError::InvalidPayload(_))));
    }

    #[test]
    fn test_non_json_rejected() {
        let result = NotePayload::from_json("<html>gateway error</html>");
        assert!(matches!(result, Err(NotesError::InvalidPayload(_))));
    }

    #[test]
    fn test_unparseable_timestamp_is_tolerated() {
        let raw = r#"{"encrypted":"AAAA","iv":[0,0,0,0,0,0,0,0,0,0,0,0],"summary":"","tone":"","timestamp":"yesterday"}"#;
        let payload = NotePayload::from_json(raw).unwrap();
        assert!(payload.saved_at().is_none());
    }
}
