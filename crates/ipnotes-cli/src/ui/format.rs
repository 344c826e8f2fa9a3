//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First line of a note, for table rows.
pub fn preview(content: &str, max_len: usize) -> String {
    let first = content.lines().next().unwrap_or("");
    let more = content.lines().nth(1).is_some();
    if more && first.chars().count() < max_len {
        format!("{}...", first)
    } else {
        truncate(first, max_len)
    }
}

/// Shorten a CID for display (`QmYwAP...nPbdG`).
pub fn short_cid(cid: &str) -> String {
    let len = cid.chars().count();
    if len <= 16 {
        return cid.to_string();
    }
    let head: String = cid.chars().take(6).collect();
    let tail: String = cid.chars().skip(len - 5).collect();
    format!("{}...{}", head, tail)
}

/// Format a stored timestamp for display, falling back to the raw string.
pub fn format_saved_at(saved_at: Option<DateTime<Utc>>, raw: &str, pretty: bool) -> String {
    match saved_at {
        Some(dt) if pretty => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Some(dt) => dt.to_rfc3339(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_preview_marks_multiline() {
        assert_eq!(preview("first\nsecond", 40), "first...");
        assert_eq!(preview("single", 40), "single");
    }

    #[test]
    fn test_short_cid() {
        assert_eq!(short_cid("QmShort"), "QmShort");
        assert_eq!(
            short_cid("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
            "QmYwAP...nPbdG"
        );
    }

    #[test]
    fn test_format_saved_at() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_saved_at(Some(dt), "", true), "2024-05-01 12:00 UTC");
        assert_eq!(format_saved_at(None, "yesterday", true), "yesterday");
    }
}
