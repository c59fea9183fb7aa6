//! Per-document match diagnostics
//!
//! Reports which required query terms a single document contains. Any
//! excluded term present in the document empties the report.

use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ExecutionMode;
use rayon::prelude::*;
use sift_core::{DocumentId, DocumentStatus, Error, Result};
use std::borrow::Cow;

/// Result of matching one document against a query
///
/// Terms borrow the index's interned storage and are sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedDocument<'a> {
    /// Required query terms present in the document
    pub terms: Vec<&'a str>,
    /// Status of the document
    pub status: DocumentStatus,
}

/// Match document `id` against `raw_query`
///
/// # Errors
///
/// - `DocumentNotFound` if `id` is not live
/// - `InvalidArgument` if `raw_query` is empty or malformed
pub fn match_document<'a>(
    index: &'a InvertedIndex,
    raw_query: &str,
    id: DocumentId,
    mode: ExecutionMode,
) -> Result<MatchedDocument<'a>> {
    let data = index
        .document_data(id)
        .ok_or(Error::DocumentNotFound(id))?;
    if raw_query.is_empty() {
        return Err(Error::invalid_argument("match query is empty"));
    }
    let query = Query::parse(raw_query, index.analyzer())?;

    let excluded = match mode {
        ExecutionMode::Sequential => query
            .minus_terms
            .iter()
            .any(|term| index.document_has_term(id, term)),
        ExecutionMode::Parallel => query
            .minus_terms
            .par_iter()
            .any(|term| index.document_has_term(id, term)),
    };
    if excluded {
        return Ok(MatchedDocument {
            terms: Vec::new(),
            status: data.status,
        });
    }

    // plus_terms is sorted and unique, so the output is too
    let matched = |term: &Cow<'_, str>| {
        index
            .term_entry(term)
            .filter(|(_, postings)| postings.contains_key(&id))
            .map(|(term, _)| term)
    };
    let terms = match mode {
        ExecutionMode::Sequential => query.plus_terms.iter().filter_map(matched).collect(),
        ExecutionMode::Parallel => query.plus_terms.par_iter().filter_map(matched).collect(),
    };

    Ok(MatchedDocument {
        terms,
        status: data.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::StopWords;
    use crate::tokenizer::Analyzer;

    fn build_index() -> InvertedIndex {
        let mut index =
            InvertedIndex::new(Analyzer::new(StopWords::from_text("in the").unwrap(), true));
        index
            .add_document(1, "cat in the city", DocumentStatus::Actual, &[1])
            .unwrap();
        index
            .add_document(2, "fluffy dog", DocumentStatus::Irrelevant, &[2])
            .unwrap();
        index
    }

    #[test]
    fn test_match_reports_sorted_terms() {
        let index = build_index();
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let m = match_document(&index, "city cat dog cat", 1, mode).unwrap();
            assert_eq!(m.terms, vec!["cat", "city"]);
            assert_eq!(m.status, DocumentStatus::Actual);
        }
    }

    #[test]
    fn test_minus_term_empties_match() {
        let index = build_index();
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let m = match_document(&index, "cat city -cat", 1, mode).unwrap();
            assert!(m.terms.is_empty());
            assert_eq!(m.status, DocumentStatus::Actual);
        }
    }

    #[test]
    fn test_absent_minus_term_is_ignored() {
        let index = build_index();
        let m = match_document(&index, "dog -cat", 2, ExecutionMode::Sequential).unwrap();
        assert_eq!(m.terms, vec!["dog"]);
        assert_eq!(m.status, DocumentStatus::Irrelevant);
    }

    #[test]
    fn test_stop_words_never_match() {
        let index = build_index();
        let m = match_document(&index, "in the", 1, ExecutionMode::Sequential).unwrap();
        assert!(m.terms.is_empty());
    }

    #[test]
    fn test_unknown_document() {
        let index = build_index();
        let err = match_document(&index, "cat", 42, ExecutionMode::Parallel).unwrap_err();
        assert_eq!(err, Error::DocumentNotFound(42));
    }

    #[test]
    fn test_empty_and_malformed_queries() {
        let index = build_index();
        assert!(match_document(&index, "", 1, ExecutionMode::Sequential)
            .unwrap_err()
            .is_invalid_argument());
        assert!(match_document(&index, "fluffy --cat", 1, ExecutionMode::Sequential)
            .unwrap_err()
            .is_invalid_argument());
        assert!(match_document(&index, "fluffy -", 1, ExecutionMode::Parallel)
            .unwrap_err()
            .is_invalid_argument());
    }
}
