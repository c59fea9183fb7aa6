//! SearchServer: the search engine facade
//!
//! Owns the inverted index (with its analyzer and term pool), the ranker
//! and the configuration, and exposes ingestion, removal, ranking and
//! matching behind one type.
//!
//! # Example
//!
//! ```
//! use sift_core::DocumentStatus;
//! use sift_search::SearchServer;
//!
//! let mut server = SearchServer::new("in the").unwrap();
//! server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//! server.add_document(2, "dog in the city", DocumentStatus::Actual, &[8, 9, 7]).unwrap();
//!
//! let hits = server.find_top_documents("cat city").unwrap();
//! assert_eq!(hits[0].id, 1);
//! assert_eq!(hits[1].id, 2);
//! ```

use crate::config::SearchConfig;
use crate::index::{DocumentData, DocumentIds, InvertedIndex, TermFrequencies};
use crate::matcher::{self, MatchedDocument};
use crate::query::Query;
use crate::scorer::TfIdfScorer;
use crate::stopwords::StopWords;
use crate::tokenizer::Analyzer;
use crate::ExecutionMode;
use sift_core::{Document, DocumentId, DocumentStatus, Result};

/// In-process full-text search engine
#[derive(Debug)]
pub struct SearchServer {
    index: InvertedIndex,
    scorer: TfIdfScorer,
    config: SearchConfig,
}

impl SearchServer {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a server from space-separated stop words
    ///
    /// Fails with `InvalidArgument` if a stop word has control characters.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_config(StopWords::from_text(stop_words)?, SearchConfig::default())
    }

    /// Create a server from any collection of stop words
    ///
    /// Empty strings are ignored.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWords::new(stop_words)?, SearchConfig::default())
    }

    /// Create a server with explicit configuration
    ///
    /// The configuration is validated first.
    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = Analyzer::new(stop_words, config.case_sensitive);
        Ok(SearchServer {
            index: InvertedIndex::new(analyzer),
            scorer: TfIdfScorer::from_config(&config),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Stop words in effect (lower-cased when case-insensitive)
    pub fn stop_words(&self) -> &StopWords {
        self.index.analyzer().stop_words()
    }

    /// Read access to the underlying index
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Index a document
    ///
    /// Fails with `InvalidArgument` for a negative or already used id, or an
    /// illegal word in `text`. Nothing is indexed on failure.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.index.add_document(id, text, status, ratings)
    }

    /// Remove a document; `false` if it was not live
    pub fn remove_document(&mut self, id: DocumentId) -> bool {
        self.remove_document_with(ExecutionMode::Sequential, id)
    }

    /// Remove a document using the given execution mode
    pub fn remove_document_with(&mut self, mode: ExecutionMode, id: DocumentId) -> bool {
        match mode {
            ExecutionMode::Sequential => self.index.remove_document(id),
            ExecutionMode::Parallel => self.index.remove_document_parallel(id),
        }
    }

    // ========================================================================
    // Ranking
    // ========================================================================

    /// Top documents with status `Actual`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by `predicate(id, status, rating)`
    pub fn find_top_documents_by<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionMode::Sequential, raw_query, predicate)
    }

    /// Top documents accepted by `predicate`, ranked in the given mode
    ///
    /// Fails with `InvalidArgument` for a malformed query. Both modes
    /// return the same documents in the same order.
    pub fn find_top_documents_with<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, self.index.analyzer())?;
        Ok(self.scorer.rank(&self.index, &query, &predicate, mode))
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Required query terms contained in document `id`
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<MatchedDocument<'_>> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, id)
    }

    /// [`match_document`](Self::match_document) in the given mode
    pub fn match_document_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<MatchedDocument<'_>> {
        matcher::match_document(&self.index, raw_query, id, mode)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Term frequencies of document `id`; empty if unknown
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.index.word_frequencies(id)
    }

    /// Number of live documents
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in ascending order
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.index.document_ids()
    }

    /// Live document ids `>= start` in ascending order
    pub fn document_ids_from(&self, start: DocumentId) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.document_ids_from(start)
    }

    /// Metadata of a live document
    pub fn document(&self, id: DocumentId) -> Option<DocumentData> {
        self.index.document_data(id)
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}
