//! Core types for sift
//!
//! This module defines the foundational types:
//! - DocumentId: Caller-assigned, non-negative document identifier
//! - DocumentStatus: Fixed status enumeration used for predicate filtering
//! - compute_average_rating: Truncating average of caller-supplied ratings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document identifier
///
/// Assigned by the caller at ingestion. Negative values are rejected by
/// the index; the signed type is kept so that the rejection is expressible.
pub type DocumentId = i32;

/// Status of an indexed document
///
/// Opaque to ranking. Only consulted by document predicates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Current document (default ranking filter)
    #[default]
    Actual,
    /// Document no longer relevant
    Irrelevant,
    /// Document banned by moderation
    Banned,
    /// Document marked as removed
    Removed,
}

impl DocumentStatus {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average of the supplied ratings
///
/// Truncating integer division; 0 for an empty slice. Summed in `i64`
/// so that large rating lists cannot overflow.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}
