//! Validated 24-word recovery phrase.
//!
//! TON wallets use the BIP-39 English wordlist, so membership checks go
//! through the `bip39` crate instead of a bundled copy of the list.

use std::fmt;

use bip39::Language;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::errors::{CheckerError, Result};

/// Number of words in a TON recovery phrase.
pub const MNEMONIC_WORD_COUNT: usize = 24;

/// Returns true when `word` (already lowercased) is in the wordlist.
pub fn is_wordlist_word(word: &str) -> bool {
    Language::English.find_word(word).is_some()
}

/// The full wordlist, in canonical order.
pub fn wordlist() -> &'static [&'static str; 2048] {
    Language::English.word_list()
}

/// An ordered 24-word phrase whose words are all in the wordlist.
///
/// The words are wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    pub fn from_words(words: Vec<String>) -> Result<Self> {
        if words.len() != MNEMONIC_WORD_COUNT || !words.iter().all(|w| is_wordlist_word(w)) {
            return Err(CheckerError::InvalidMnemonic { found: words });
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words joined by single spaces, the form the key derivation hashes.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    /// `first-last` hint used in report headers.
    pub fn short_label(&self) -> String {
        // from_words guarantees 24 entries
        format!("{}-{}", self.words[0], self.words[MNEMONIC_WORD_COUNT - 1])
    }
}

// Keep the phrase out of logs and panic messages.
impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({})", self.short_label())
    }
}
