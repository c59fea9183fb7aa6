//! TF-IDF scoring and ranking
//!
//! This module provides:
//! - DocumentPredicate: filter over (id, status, rating)
//! - TfIdfScorer: relevance accumulation, minus-term exclusion, ordering
//!   and top-K truncation
//! - sort_by_relevance: the epsilon tie-break ordering
//!
//! # Formula
//!
//! For each required term t present in the index:
//!
//! relevance(d) += tf(t, d) * ln(N / df(t))
//!
//! Every document containing an excluded term is then dropped, whatever
//! it accumulated. Exclusion runs strictly after inclusion.

use crate::config::SearchConfig;
use crate::index::{InvertedIndex, PostingList};
use crate::query::Query;
use crate::ExecutionMode;
use rayon::prelude::*;
use sift_concurrency::ShardedMap;
use sift_core::{Document, DocumentId, DocumentStatus};
use std::collections::BTreeMap;

// ============================================================================
// DocumentPredicate
// ============================================================================

/// Filter deciding which documents may be ranked
///
/// Implemented for every `Fn(DocumentId, DocumentStatus, i32) -> bool + Sync`,
/// so closures work directly. `Sync` lets parallel ranking share it.
pub trait DocumentPredicate: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync {}

impl<F> DocumentPredicate for F where F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync {}

// ============================================================================
// Ordering
// ============================================================================

/// Order hits by relevance descending, breaking near-ties by rating
///
/// Two hits whose relevance differs by less than `epsilon` are tied and
/// ordered by rating descending; otherwise the more relevant hit comes
/// first. After sorting, every adjacent pair either drops in relevance by
/// at least `epsilon`, or is tied with non-increasing rating.
///
/// Hits are first sorted by a total order (relevance, rating, id). The tie
/// rule is not transitive across chains of near-equal relevances, so an
/// insertion pass then moves each hit ahead of the neighbors it outranks.
/// Hits already in place are never swapped, so exact ties keep ascending
/// id order.
pub fn sort_by_relevance(hits: &mut [Document], epsilon: f64) {
    hits.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.rating.cmp(&a.rating))
            .then_with(|| a.id.cmp(&b.id))
    });

    for i in 1..hits.len() {
        let mut j = i;
        while j > 0 && ranks_before(&hits[j], &hits[j - 1], epsilon) {
            hits.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Whether `a` must be placed ahead of `b`
#[inline]
fn ranks_before(a: &Document, b: &Document, epsilon: f64) -> bool {
    if (a.relevance - b.relevance).abs() < epsilon {
        a.rating > b.rating
    } else {
        a.relevance > b.relevance
    }
}

// ============================================================================
// TfIdfScorer
// ============================================================================

/// TF-IDF ranker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfIdfScorer {
    max_results: usize,
    relevance_epsilon: f64,
    shard_count: usize,
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl TfIdfScorer {
    /// Create a ranker with explicit limits
    pub fn new(max_results: usize, relevance_epsilon: f64, shard_count: usize) -> Self {
        TfIdfScorer {
            max_results,
            relevance_epsilon,
            shard_count,
        }
    }

    /// Create a ranker from configuration
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.max_results,
            config.relevance_epsilon,
            config.shard_count,
        )
    }

    /// Top-K limit
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Rank documents matching `query`
    ///
    /// Accumulates relevance (on the rayon pool in `Parallel` mode), drops
    /// excluded documents, orders with [`sort_by_relevance`] and truncates
    /// to the top-K limit.
    pub fn rank<P: DocumentPredicate>(
        &self,
        index: &InvertedIndex,
        query: &Query<'_>,
        predicate: &P,
        mode: ExecutionMode,
    ) -> Vec<Document> {
        let relevance = match mode {
            ExecutionMode::Sequential => self.accumulate(index, query, predicate),
            ExecutionMode::Parallel => self.accumulate_parallel(index, query, predicate),
        };

        let mut hits: Vec<Document> = relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                index
                    .document_data(id)
                    .map(|data| Document::new(id, relevance, data.rating))
            })
            .collect();

        sort_by_relevance(&mut hits, self.relevance_epsilon);
        hits.truncate(self.max_results);
        hits
    }

    /// Relevance of every matching document, single-threaded
    pub fn accumulate<P: DocumentPredicate>(
        &self,
        index: &InvertedIndex,
        query: &Query<'_>,
        predicate: &P,
    ) -> BTreeMap<DocumentId, f64> {
        let mut relevance = BTreeMap::new();

        for term in &query.plus_terms {
            let Some((postings, idf)) = weighted_postings(index, term) else {
                continue;
            };
            for (&id, &tf) in postings {
                if accepts(index, predicate, id) {
                    *relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for term in &query.minus_terms {
            if let Some(postings) = index.postings(term) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
    }

    /// Relevance of every matching document, one rayon task per term
    ///
    /// Tasks accumulate into a [`ShardedMap`], so they only contend on
    /// documents sharing a shard. All inclusion tasks finish before any
    /// exclusion task starts.
    pub fn accumulate_parallel<P: DocumentPredicate>(
        &self,
        index: &InvertedIndex,
        query: &Query<'_>,
        predicate: &P,
    ) -> BTreeMap<DocumentId, f64> {
        let relevance: ShardedMap<DocumentId, f64> = ShardedMap::new(self.shard_count);

        query.plus_terms.par_iter().for_each(|term| {
            let Some((postings, idf)) = weighted_postings(index, term) else {
                return;
            };
            for (&id, &tf) in postings {
                if accepts(index, predicate, id) {
                    *relevance.access(id) += tf * idf;
                }
            }
        });

        query.minus_terms.par_iter().for_each(|term| {
            if let Some(postings) = index.postings(term) {
                for &id in postings.keys() {
                    relevance.erase(id);
                }
            }
        });

        relevance.into_inner()
    }
}

/// Posting list and IDF of an indexed term
fn weighted_postings<'a>(index: &'a InvertedIndex, term: &str) -> Option<(&'a PostingList, f64)> {
    let postings = index.postings(term)?;
    let idf = (index.document_count() as f64 / postings.len() as f64).ln();
    Some((postings, idf))
}

#[inline]
fn accepts<P: DocumentPredicate>(index: &InvertedIndex, predicate: &P, id: DocumentId) -> bool {
    index
        .document_data(id)
        .is_some_and(|data| predicate(id, data.status, data.rating))
}

// ============================================================================
// Tests
// ============================================================================
