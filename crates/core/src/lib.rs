//! Core types for the sift search engine
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: Caller-assigned document identifier
//! - DocumentStatus: Document metadata used for predicate filtering
//! - Document: A ranked search hit (id, relevance, rating)
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod search_types;
pub mod types;

pub use error::{Error, Result};
pub use search_types::Document;
pub use types::{compute_average_rating, DocumentId, DocumentStatus};
