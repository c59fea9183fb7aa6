//! Inverted index for TF-IDF keyword search
//!
//! This module provides:
//! - InvertedIndex with two synchronized views of the same facts:
//!   term → {document → tf} and document → {term → tf}
//! - Document metadata (rating, status) and the live document set
//! - Sequential and parallel document removal
//!
//! # Invariants
//!
//! - Both directions are updated together on add and remove; a failed
//!   add mutates nothing.
//! - Every live document has an entry in `doc_to_terms` (possibly empty).
//! - No term maps to an empty posting list.
//! - Within one document the frequencies of its distinct terms sum to 1.
//!
//! # Concurrency
//!
//! The index does not lock internally. Concurrent readers are fine
//! (`InvertedIndex: Sync`); mutation needs `&mut self`, so callers sharing
//! an index across threads wrap it in a `RwLock`.

use crate::interner::TermPool;
use crate::tokenizer::Analyzer;
use rayon::prelude::*;
use sift_core::{compute_average_rating, DocumentId, DocumentStatus, Error, Result};
use std::collections::{btree_map, BTreeMap};
use std::iter::Copied;
use std::sync::Arc;
use tracing::debug;

/// Per-document term frequencies, keyed by interned term
pub type TermFrequencies = BTreeMap<Arc<str>, f64>;

/// Documents containing one term, with that term's frequency in each
pub type PostingList = BTreeMap<DocumentId, f64>;

static EMPTY_FREQUENCIES: TermFrequencies = BTreeMap::new();

/// Iterator over live document ids in ascending order
pub type DocumentIds<'a> = Copied<btree_map::Keys<'a, DocumentId, DocumentData>>;

// ============================================================================
// DocumentData
// ============================================================================

/// Metadata stored for every live document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    /// Average of the ratings supplied at ingestion
    pub rating: i32,
    /// Status used by document predicates
    pub status: DocumentStatus,
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Inverted index over short text documents
#[derive(Debug)]
pub struct InvertedIndex {
    analyzer: Analyzer,
    /// Shared backing storage for every term key below
    pool: TermPool,
    /// Term -> PostingList mapping
    term_to_docs: BTreeMap<Arc<str>, PostingList>,
    /// Document -> term frequencies mapping
    doc_to_terms: BTreeMap<DocumentId, TermFrequencies>,
    /// Live documents; the keys are the authoritative existence set
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new(Analyzer::default())
    }
}

impl InvertedIndex {
    /// Create an empty index using `analyzer` for ingestion
    pub fn new(analyzer: Analyzer) -> Self {
        InvertedIndex {
            analyzer,
            pool: TermPool::new(),
            term_to_docs: BTreeMap::new(),
            doc_to_terms: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }

    /// Analyzer shared by ingestion and query parsing
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Number of live documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed terms
    pub fn term_count(&self) -> usize {
        self.term_to_docs.len()
    }

    /// Number of terms held by the intern pool
    ///
    /// Always equals `term_count()`: a term leaves the pool as soon as its
    /// last document is removed.
    pub fn pooled_term_count(&self) -> usize {
        self.pool.len()
    }

    /// Number of live documents containing `term`
    pub fn doc_freq(&self, term: &str) -> usize {
        self.term_to_docs.get(term).map_or(0, PostingList::len)
    }

    /// Inverse document frequency of an indexed term
    ///
    /// IDF(t) = ln(N / df). `None` for a term no live document contains.
    pub fn compute_idf(&self, term: &str) -> Option<f64> {
        let postings = self.term_to_docs.get(term)?;
        Some((self.documents.len() as f64 / postings.len() as f64).ln())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Check whether `id` is live
    pub fn contains_document(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Metadata of a live document
    pub fn document_data(&self, id: DocumentId) -> Option<DocumentData> {
        self.documents.get(&id).copied()
    }

    /// Term frequencies of a document
    ///
    /// Empty for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.doc_to_terms.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Posting list of a term
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.term_to_docs.get(term)
    }

    /// Interned spelling and posting list of a term
    ///
    /// The returned `&str` borrows the index's own storage.
    pub fn term_entry(&self, term: &str) -> Option<(&str, &PostingList)> {
        self.term_to_docs
            .get_key_value(term)
            .map(|(term, postings)| (&**term, postings))
    }

    /// Check whether document `id` contains `term`
    pub fn document_has_term(&self, id: DocumentId, term: &str) -> bool {
        self.term_to_docs
            .get(term)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Live document ids in ascending order
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.documents.keys().copied()
    }

    /// Live document ids `>= start` in ascending order
    ///
    /// Lets a caller resume a scan from a cursor it holds itself.
    pub fn document_ids_from(&self, start: DocumentId) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.range(start..).map(|(&id, _)| id)
    }

    /// Indexed terms in ascending order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.term_to_docs.keys().map(|term| &**term)
    }

    // ========================================================================
    // Index Updates
    // ========================================================================

    /// Index a document
    ///
    /// Fails with `InvalidArgument` if `id` is negative or already live, or
    /// if the text contains an illegal word. Nothing is inserted on failure.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(Error::invalid_argument(format!(
                "document id {} is negative",
                id
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::invalid_argument(format!(
                "document id {} is already indexed",
                id
            )));
        }

        let terms = self.analyzer.tokenize(text)?;
        let inv_word_count = 1.0 / terms.len() as f64;

        let mut frequencies = TermFrequencies::new();
        for term in &terms {
            let term = self.pool.intern(term);
            *frequencies.entry(term).or_insert(0.0) += inv_word_count;
        }

        for (term, &tf) in &frequencies {
            self.term_to_docs
                .entry(Arc::clone(term))
                .or_default()
                .insert(id, tf);
        }

        debug!(
            target: "sift::index",
            document_id = id,
            words = terms.len(),
            distinct = frequencies.len(),
            "Document indexed"
        );

        self.doc_to_terms.insert(id, frequencies);
        self.documents.insert(
            id,
            DocumentData {
                rating: compute_average_rating(ratings),
                status,
            },
        );
        Ok(())
    }

    /// Forget a document's metadata and hand back its term frequencies
    fn detach(&mut self, id: DocumentId) -> Option<TermFrequencies> {
        self.documents.remove(&id)?;
        let frequencies = self.doc_to_terms.remove(&id).unwrap_or_default();
        debug!(
            target: "sift::index",
            document_id = id,
            terms = frequencies.len(),
            "Document removed"
        );
        Some(frequencies)
    }

    /// Remove a document from the index
    ///
    /// Returns `false` (and changes nothing) if `id` is not live. Terms left
    /// without documents are pruned and released from the pool.
    pub fn remove_document(&mut self, id: DocumentId) -> bool {
        let Some(frequencies) = self.detach(id) else {
            return false;
        };

        for term in frequencies.keys() {
            if let Some(postings) = self.term_to_docs.get_mut(term) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.term_to_docs.remove(term);
                    self.pool.release(term);
                }
            }
        }
        true
    }

    /// Remove a document, deleting its postings on the rayon pool
    ///
    /// The document's posting lists are detached from the term map, each
    /// worker deletes the document from its own lists, and the lists that
    /// are still non-empty are put back serially. Emptied lists are not
    /// re-inserted and their terms are released from the pool.
    pub fn remove_document_parallel(&mut self, id: DocumentId) -> bool {
        let Some(frequencies) = self.detach(id) else {
            return false;
        };

        let mut detached: Vec<(Arc<str>, PostingList)> = frequencies
            .keys()
            .filter_map(|term| self.term_to_docs.remove_entry(term))
            .collect();

        detached.par_iter_mut().for_each(|(_, postings)| {
            postings.remove(&id);
        });

        for (term, postings) in detached {
            if postings.is_empty() {
                self.pool.release(&term);
            } else {
                self.term_to_docs.insert(term, postings);
            }
        }
        true
    }

    /// Check that both directions describe the same facts
    ///
    /// Linear in the index size; meant for tests and debugging.
    pub fn is_consistent(&self) -> bool {
        if !self.doc_to_terms.keys().eq(self.documents.keys()) {
            return false;
        }
        let forward_ok = self.term_to_docs.iter().all(|(term, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(id, tf)| {
                    self.doc_to_terms
                        .get(id)
                        .and_then(|freqs| freqs.get(term))
                        .is_some_and(|f| f == tf)
                })
        });
        let backward_ok = self.doc_to_terms.iter().all(|(id, freqs)| {
            freqs.iter().all(|(term, tf)| {
                self.term_to_docs
                    .get(term)
                    .and_then(|postings| postings.get(id))
                    .is_some_and(|f| f == tf)
            })
        });
        forward_ok && backward_ok
    }
}

// ============================================================================
// Tests
// ============================================================================
