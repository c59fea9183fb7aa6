//! Text tokenizer for search operations
//!
//! Pipeline: split on spaces → validate → (optionally) lowercase → drop stopwords
//!
//! Terms are delimited by the space character only. Any other character
//! below U+0020 (tab, newline, other control characters) makes the term
//! illegal rather than acting as a separator.

use crate::stopwords::StopWords;
use sift_core::{Error, Result};
use std::borrow::Cow;

/// Split text into space-delimited words
///
/// Runs of spaces collapse; leading and trailing spaces are ignored.
/// Words borrow from `text`.
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::split_into_words;
///
/// let words: Vec<_> = split_into_words("  cat in  the city ").collect();
/// assert_eq!(words, vec!["cat", "in", "the", "city"]);
/// ```
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// Check that a word contains no control characters (code points below space)
#[inline]
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Reject a word with control characters
pub(crate) fn validate_word(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "word {:?} contains invalid characters",
            word
        )))
    }
}

/// Document and query analysis settings
///
/// Owns the stop-word set and the case policy. Both ingestion and query
/// parsing go through the same analyzer so that their terms agree.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stop_words: StopWords,
    case_sensitive: bool,
}

impl Analyzer {
    /// Create an analyzer
    ///
    /// Stop words are normalized with the same case policy as terms.
    pub fn new(stop_words: StopWords, case_sensitive: bool) -> Self {
        let stop_words = if case_sensitive {
            stop_words
        } else {
            stop_words.to_lowercase()
        };
        Analyzer {
            stop_words,
            case_sensitive,
        }
    }

    /// The stop-word set in use
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Whether terms keep their case
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Apply the case policy to a validated word
    ///
    /// Case-insensitive analysis folds every word through
    /// `str::to_lowercase`, titlecase letters included.
    pub fn normalize<'t>(&self, word: &'t str) -> Cow<'t, str> {
        if self.case_sensitive {
            return Cow::Borrowed(word);
        }
        if word.is_ascii() {
            return if word.bytes().any(|b| b.is_ascii_uppercase()) {
                Cow::Owned(word.to_ascii_lowercase())
            } else {
                Cow::Borrowed(word)
            };
        }
        let lowered = word.to_lowercase();
        if lowered == word {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(lowered)
        }
    }

    /// Check whether a normalized term is a stop word
    #[inline]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Tokenize document text into indexable terms
    ///
    /// Fails on the first illegal word, before anything is returned, so a
    /// caller that only mutates on `Ok` never partially ingests a document.
    /// Stop words are removed; repeated terms are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use sift_search::stopwords::StopWords;
    /// use sift_search::tokenizer::Analyzer;
    ///
    /// let analyzer = Analyzer::new(StopWords::from_text("in the").unwrap(), true);
    /// let terms = analyzer.tokenize("cat in the city").unwrap();
    /// assert_eq!(terms, vec!["cat", "city"]);
    /// ```
    pub fn tokenize<'t>(&self, text: &'t str) -> Result<Vec<Cow<'t, str>>> {
        let mut terms = Vec::new();
        for word in split_into_words(text) {
            validate_word(word)?;
            let term = self.normalize(word);
            if !self.is_stop_word(&term) {
                terms.push(term);
            }
        }
        Ok(terms)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(StopWords::default(), true)
    }
}
