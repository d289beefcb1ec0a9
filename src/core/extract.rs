//! Mnemonic extraction from loosely formatted pasted text.
//!
//! Two strategies are tried in order:
//! 1. numbered listings (`3. apple`, or `3.` with the word on the next line),
//!    which restore the original word order;
//! 2. every wordlist word in the text, in the order it appears.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::errors::Result;
use crate::core::mnemonic::{is_wordlist_word, Mnemonic, MNEMONIC_WORD_COUNT};

/// `<index>.<word>` with optional whitespace around the dot.
static NUMBERED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*\.\s*([A-Za-z]+)$").expect("valid numbered word regex"));

/// `<index>.` at the start of a line, word expected on the following line.
static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*\.+").expect("valid numbered prefix regex"));

/// A word recovered together with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedWord {
    pub index: usize,
    pub word: String,
}

/// Line scanner state for numbered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    /// The previous line was a bare `<index>.`; the next line carries its word.
    AwaitingWord(usize),
}

impl ScanState {
    /// Feed one non-empty, trimmed line.
    ///
    /// Returns the next state and the word recovered from this line, if any.
    pub fn step(self, line: &str) -> (ScanState, Option<IndexedWord>) {
        let mut recovered = None;
        if let ScanState::AwaitingWord(index) = self {
            if let Some(token) = line.split_whitespace().next() {
                let word = token.to_lowercase();
                if is_wordlist_word(&word) {
                    recovered = Some(IndexedWord { index, word });
                }
            }
        }

        if let Some(caps) = NUMBERED_WORD.captures(line) {
            let word = caps[2].to_lowercase();
            return match caps[1].parse::<usize>() {
                Ok(index) if is_wordlist_word(&word) => {
                    (ScanState::Idle, Some(IndexedWord { index, word }))
                }
                _ => (ScanState::Idle, recovered),
            };
        }

        if let Some(caps) = NUMBERED_PREFIX.captures(line) {
            let next = match caps[1].parse::<usize>() {
                Ok(index) => ScanState::AwaitingWord(index),
                Err(_) => ScanState::Idle,
            };
            return (next, recovered);
        }

        (ScanState::Idle, recovered)
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Numbered-listing pass.
///
/// Returns the words ordered by index when every index `1..=24` was filled.
/// Later entries for the same index replace earlier ones; indices outside
/// the range are ignored.
pub fn extract_numbered(text: &str) -> Option<Vec<String>> {
    let mut state = ScanState::Idle;
    let mut slots: BTreeMap<usize, String> = BTreeMap::new();

    for line in non_empty_lines(text) {
        let (next, recovered) = state.step(line);
        state = next;
        if let Some(IndexedWord { index, word }) = recovered {
            if (1..=MNEMONIC_WORD_COUNT).contains(&index) {
                slots.insert(index, word);
            }
        }
    }

    if slots.len() == MNEMONIC_WORD_COUNT {
        Some(slots.into_values().collect())
    } else {
        None
    }
}

/// Unordered pass: every wordlist fragment, lowercased, in encounter order.
///
/// Fragments are separated by whitespace or periods.
pub fn extract_unordered(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == '.')
        .filter(|frag| !frag.is_empty())
        .map(str::to_lowercase)
        .filter(|frag| is_wordlist_word(frag))
        .collect()
}

/// Extract a validated mnemonic from pasted text.
///
/// Fails with [`CheckerError::InvalidMnemonic`](crate::core::errors::CheckerError)
/// carrying the unordered candidates when neither pass yields 24 words.
pub fn extract_mnemonic(text: &str) -> Result<Mnemonic> {
    let words = extract_numbered(text).unwrap_or_else(|| extract_unordered(text));
    Mnemonic::from_words(words)
}
