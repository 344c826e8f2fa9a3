//! Local note enhancement: a short summary and an overall tone.
//!
//! The heuristic enhancer needs no models: tone comes from a small sentiment
//! lexicon and the summary from leading sentences. Labels follow the binary
//! sentiment convention (`POSITIVE` / `NEGATIVE`), with `neutral` when the
//! text carries no signal.

use crate::error::{NotesError, Result};

/// Tone used when no sentiment signal is found.
pub const NEUTRAL_TONE: &str = "neutral";

/// Summary used when the text yields nothing to summarize.
pub const EMPTY_SUMMARY: &str = "No summary available.";

const MIN_SUMMARY_WORDS: usize = 30;
const MAX_SUMMARY_WORDS: usize = 80;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "awesome", "happy", "glad", "love", "loved",
    "like", "enjoy", "enjoyed", "wonderful", "fantastic", "nice", "best", "fun", "excited",
    "success", "win", "won", "grateful", "thanks", "thank", "beautiful", "perfect", "calm",
    "proud", "easy", "better",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "sad", "angry", "hate", "hated", "annoyed",
    "annoying", "worst", "fail", "failed", "failure", "broken", "tired", "stress",
    "stressed", "worried", "worry", "sick", "pain", "hard", "lost", "wrong", "problem",
    "bug", "late", "upset", "boring",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "don't", "didn't", "isn't", "wasn't", "can't"];

/// Summary and tone attached to a note before saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub summary: String,
    pub tone: String,
}

impl Enhancement {
    /// Summary as stored in the payload: `"<summary> (Tone: <tone>)"`.
    pub fn display_summary(&self) -> String {
        format!("{} (Tone: {})", self.summary, self.tone)
    }
}

/// Produces an `Enhancement` for note text.
pub trait Enhancer {
    fn enhance(&self, text: &str) -> Result<Enhancement>;
}

/// Lexicon sentiment + leading-sentence summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicEnhancer;

impl HeuristicEnhancer {
    pub fn new() -> Self {
        Self
    }

    /// Sentiment label for the text.
    pub fn tone(&self, text: &str) -> &'static str {
        let mut score: i32 = 0;
        let mut negate_next = false;

        for word in words(text) {
            let lower = word.to_lowercase();
            if NEGATIONS.contains(&lower.as_str()) {
                negate_next = true;
                continue;
            }
            let polarity = if POSITIVE_WORDS.contains(&lower.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&lower.as_str()) {
                -1
            } else {
                0
            };
            if polarity != 0 {
                score += if negate_next { -polarity } else { polarity };
            }
            negate_next = false;
        }

        match score.cmp(&0) {
            std::cmp::Ordering::Greater => "POSITIVE",
            std::cmp::Ordering::Less => "NEGATIVE",
            std::cmp::Ordering::Equal => NEUTRAL_TONE,
        }
    }

    /// Leading sentences until at least `MIN_SUMMARY_WORDS`, capped at
    /// `MAX_SUMMARY_WORDS`.
    pub fn summarize(&self, text: &str) -> String {
        let mut picked: Vec<&str> = Vec::new();
        let mut count = 0;

        for sentence in sentences(text) {
            picked.push(sentence);
            count += sentence.split_whitespace().count();
            if count >= MIN_SUMMARY_WORDS {
                break;
            }
        }

        if picked.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let joined = picked.join(" ");
        let all_words: Vec<&str> = joined.split_whitespace().collect();
        if all_words.len() > MAX_SUMMARY_WORDS {
            format!("{}...", all_words[..MAX_SUMMARY_WORDS].join(" "))
        } else {
            all_words.join(" ")
        }
    }
}

impl Enhancer for HeuristicEnhancer {
    fn enhance(&self, text: &str) -> Result<Enhancement> {
        if text.trim().is_empty() {
            return Err(NotesError::InvalidInput(
                "Please enter some text first".to_string(),
            ));
        }
        Ok(Enhancement {
            summary: self.summarize(text),
            tone: self.tone(text).to_string(),
        })
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() && sentence.chars().any(|c| c.is_alphanumeric()) {
                out.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() && tail.chars().any(|c| c.is_alphanumeric()) {
        out.push(tail);
    }
    out
}
