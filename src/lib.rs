//! Sift - in-process full-text search
//!
//! Sift indexes short text documents and answers ranked top-K queries with
//! TF-IDF relevance, required and excluded terms, and per-document
//! predicates over status and rating. Ranking and removal can run on the
//! rayon pool.
//!
//! # Quick Start
//!
//! ```
//! use sift::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::new("in the")?;
//! server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])?;
//! server.add_document(2, "dog in the city", DocumentStatus::Actual, &[8, 9, 7])?;
//!
//! let hits = server.find_top_documents("cat city -dog")?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].to_string(), format!("{{ document_id = 1, relevance = {}, rating = 2 }}", hits[0].relevance));
//! # Ok::<(), sift::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `sift-core`: identifiers, statuses, ranked hits and the error type
//! - `sift-concurrency`: the sharded accumulator used by parallel ranking
//! - `sift-search`: index, query parsing, ranking and the `SearchServer`

pub use sift_concurrency::{ShardAccess, ShardKey, ShardedMap};
pub use sift_core::*;
pub use sift_search::*;
