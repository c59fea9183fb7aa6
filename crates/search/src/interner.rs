//! Term interning
//!
//! Every distinct term is stored once. Both directions of the inverted
//! index key their maps by the same shared `Arc<str>`, so a term occurring
//! in thousands of documents costs one allocation.
//!
//! The pool is owned by the index; handed-out terms are reference counted
//! and stay valid for as long as any map still holds them. The index
//! releases a term once no document contains it.

use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Pool of interned terms
#[derive(Debug, Default)]
pub struct TermPool {
    terms: FxHashSet<Arc<str>>,
}

impl TermPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a term and return its shared handle
    ///
    /// Returns the existing handle if the term is already pooled.
    pub fn intern(&mut self, term: &str) -> Arc<str> {
        if let Some(existing) = self.terms.get(term) {
            return Arc::clone(existing);
        }
        let shared: Arc<str> = Arc::from(term);
        self.terms.insert(Arc::clone(&shared));
        shared
    }

    /// Look up an already-interned term
    pub fn get(&self, term: &str) -> Option<&Arc<str>> {
        self.terms.get(term)
    }

    /// Number of pooled terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Drop a term from the pool
    ///
    /// Handles already given out stay valid. Returns `false` if the term
    /// was not pooled.
    pub fn release(&mut self, term: &str) -> bool {
        self.terms.remove(term)
    }
}
