//! In-process TF-IDF full-text search
//!
//! This crate provides:
//! - Tokenizer, stop words and the case-aware Analyzer
//! - InvertedIndex with interned terms and dual term/document maps
//! - Query parsing with required and excluded terms
//! - TfIdfScorer with sequential and sharded parallel accumulation
//! - Per-document match diagnostics
//! - SearchServer facade and SearchConfig
//! - RequestQueue, batch query fan-out, batch ingest and duplicate removal
//!
//! # Usage
//!
//! ```
//! use sift_core::DocumentStatus;
//! use sift_search::{ExecutionMode, SearchServer};
//!
//! let mut server = SearchServer::new("in the").unwrap();
//! server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//!
//! let hits = server
//!     .find_top_documents_with(ExecutionMode::Parallel, "cat -dog", |_, _, _| true)
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod dedup;
pub mod index;
pub mod interner;
pub mod matcher;
pub mod query;
pub mod request_queue;
pub mod scorer;
pub mod server;
pub mod stopwords;
pub mod tokenizer;

// Re-export commonly used types
pub use batch::{add_documents, process_queries, process_queries_joined, NewDocument};
pub use config::SearchConfig;
pub use dedup::{find_duplicates, remove_duplicates};
pub use index::{DocumentData, InvertedIndex, PostingList, TermFrequencies};
pub use matcher::MatchedDocument;
pub use query::Query;
pub use request_queue::RequestQueue;
pub use scorer::{sort_by_relevance, DocumentPredicate, TfIdfScorer};
pub use server::SearchServer;
pub use stopwords::StopWords;
pub use tokenizer::Analyzer;

/// How an operation uses threads
///
/// `Parallel` runs on the global rayon pool. Both modes produce the same
/// observable results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// Run on the calling thread
    #[default]
    Sequential,
    /// Spread work across the rayon pool
    Parallel,
}
