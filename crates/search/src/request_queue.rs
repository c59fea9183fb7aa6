//! Request tracking over a trailing window
//!
//! `RequestQueue` forwards ranking requests to a [`SearchServer`] and
//! remembers, for the last `request_window` requests, whether each one came
//! back empty.

use crate::server::SearchServer;
use sift_core::{Document, DocumentId, DocumentStatus, Result};
use std::collections::VecDeque;

/// Ranking front end that counts empty results
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    window: usize,
    /// `true` for a request that returned nothing, oldest first
    requests: VecDeque<bool>,
    no_results: usize,
}

impl<'a> RequestQueue<'a> {
    /// Track requests against `server` using its configured window
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, server.config().request_window)
    }

    /// Track requests against `server` over the last `window` requests
    ///
    /// A zero window is raised to one.
    pub fn with_window(server: &'a SearchServer, window: usize) -> Self {
        let window = window.max(1);
        RequestQueue {
            server,
            window,
            requests: VecDeque::with_capacity(window.min(4096)),
            no_results: 0,
        }
    }

    /// Rank documents with status `Actual` and record the outcome
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let hits = self.server.find_top_documents(raw_query)?;
        self.record(hits.is_empty());
        Ok(hits)
    }

    /// Rank documents with the given status and record the outcome
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let hits = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(hits.is_empty());
        Ok(hits)
    }

    /// Rank documents accepted by `predicate` and record the outcome
    pub fn add_find_request_by<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let hits = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(hits.is_empty());
        Ok(hits)
    }

    /// Requests in the current window that returned no documents
    pub fn no_result_requests(&self) -> usize {
        self.no_results
    }

    /// Requests currently in the window
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if no request has been recorded
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == self.window {
            if let Some(true) = self.requests.pop_front() {
                self.no_results -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_results += 1;
        }
    }
}
