//! Stop-word set
//!
//! Immutable set of terms excluded from indexing and from query matching.

use crate::tokenizer::{split_into_words, validate_word};
use rustc_hash::FxHashSet;
use sift_core::Result;

/// Immutable set of stop words
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl StopWords {
    /// Build from any collection of words
    ///
    /// Empty strings are dropped. A word with control characters fails
    /// with `InvalidArgument`.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FxHashSet::default();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            validate_word(word)?;
            set.insert(word.to_string());
        }
        Ok(StopWords { words: set })
    }

    /// Build from space-separated text
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    /// Check membership
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Lower-cased copy, for case-insensitive analysis
    pub(crate) fn to_lowercase(&self) -> Self {
        StopWords {
            words: self.words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}
