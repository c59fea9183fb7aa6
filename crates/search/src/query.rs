//! Query parsing
//!
//! A raw query is a space-separated list of words. A word prefixed with
//! `-` is an exclusion ("minus") term, every other word is a required
//! ("plus") term. Stop words are dropped from both lists.
//!
//! Malformed words fail the whole query with `InvalidArgument`:
//! - `-` alone (nothing after the exclusion marker)
//! - `--cat` (double exclusion marker)
//! - any word with control characters

use crate::tokenizer::{split_into_words, validate_word, Analyzer};
use sift_core::{Error, Result};
use std::borrow::Cow;

/// Marker introducing an exclusion term
pub const EXCLUSION_MARKER: char = '-';

/// Parsed query
///
/// Both term lists are sorted and deduplicated, so they behave as sets and
/// support binary search. Terms borrow from the raw query text unless the
/// analyzer had to lowercase them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    /// Required terms
    pub plus_terms: Vec<Cow<'q, str>>,
    /// Excluded terms
    pub minus_terms: Vec<Cow<'q, str>>,
}

impl<'q> Query<'q> {
    /// Parse raw query text
    ///
    /// # Example
    ///
    /// ```
    /// use sift_search::query::Query;
    /// use sift_search::tokenizer::Analyzer;
    ///
    /// let query = Query::parse("fluffy cat -collar cat", &Analyzer::default()).unwrap();
    /// assert_eq!(query.plus_terms, vec!["cat", "fluffy"]);
    /// assert_eq!(query.minus_terms, vec!["collar"]);
    /// ```
    pub fn parse(raw_query: &'q str, analyzer: &Analyzer) -> Result<Self> {
        let mut query = Query::default();

        for word in split_into_words(raw_query) {
            let (term, is_minus) = parse_query_word(word)?;
            let term = analyzer.normalize(term);
            if analyzer.is_stop_word(&term) {
                continue;
            }
            if is_minus {
                query.minus_terms.push(term);
            } else {
                query.plus_terms.push(term);
            }
        }

        query.plus_terms.sort_unstable();
        query.plus_terms.dedup();
        query.minus_terms.sort_unstable();
        query.minus_terms.dedup();
        Ok(query)
    }

    /// Check whether the query has no terms left after stop-word removal
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }

    /// Binary search the required terms
    pub fn has_plus_term(&self, term: &str) -> bool {
        self.plus_terms
            .binary_search_by(|t| t.as_ref().cmp(term))
            .is_ok()
    }

    /// Binary search the excluded terms
    pub fn has_minus_term(&self, term: &str) -> bool {
        self.minus_terms
            .binary_search_by(|t| t.as_ref().cmp(term))
            .is_ok()
    }
}

/// Split one word into its term and exclusion flag, validating it
fn parse_query_word(word: &str) -> Result<(&str, bool)> {
    let (term, is_minus) = match word.strip_prefix(EXCLUSION_MARKER) {
        Some(rest) => (rest, true),
        None => (word, false),
    };

    if term.is_empty() {
        return Err(Error::invalid_argument(format!(
            "query word {:?} has nothing after the exclusion marker",
            word
        )));
    }
    if term.starts_with(EXCLUSION_MARKER) {
        return Err(Error::invalid_argument(format!(
            "query word {:?} has a double exclusion marker",
            word
        )));
    }
    validate_word(term)?;
    Ok((term, is_minus))
}
