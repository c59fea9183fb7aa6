//! Ranked search result type
//!
//! `Document` is what ranking hands back to callers: the document id, its
//! accumulated TF-IDF relevance and its average rating.

use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ranked search hit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance
    pub relevance: f64,
    /// Average rating supplied at ingestion
    pub rating: i32,
}

impl Document {
    /// Create a new hit
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}
