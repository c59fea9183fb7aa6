//! Batch helpers
//!
//! - `process_queries`: rank many queries on the rayon pool
//! - `add_documents`: ingest many documents, reporting failures instead of
//!   stopping at the first one

use crate::server::SearchServer;
use rayon::prelude::*;
use sift_core::{Document, DocumentId, DocumentStatus, Error, Result};
use tracing::warn;

/// Document awaiting ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument<'t> {
    /// Identifier to assign
    pub id: DocumentId,
    /// Raw text
    pub text: &'t str,
    /// Initial status
    pub status: DocumentStatus,
    /// Ratings to average
    pub ratings: Vec<i32>,
}

impl<'t> NewDocument<'t> {
    /// Create a pending document
    pub fn new(id: DocumentId, text: &'t str, status: DocumentStatus, ratings: Vec<i32>) -> Self {
        NewDocument {
            id,
            text,
            status,
            ratings,
        }
    }
}

/// Rank every query with [`SearchServer::find_top_documents`] in parallel
///
/// Result `i` belongs to `queries[i]`. If any query fails, the error of
/// the earliest failing query is returned.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// [`process_queries`] with the per-query results concatenated in order
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}

/// Add each document, continuing past rejected ones
///
/// Returns the rejected ids with their errors, in input order.
pub fn add_documents<'t, I>(server: &mut SearchServer, documents: I) -> Vec<(DocumentId, Error)>
where
    I: IntoIterator<Item = NewDocument<'t>>,
{
    let mut rejected = Vec::new();
    for document in documents {
        if let Err(e) = server.add_document(
            document.id,
            document.text,
            document.status,
            &document.ratings,
        ) {
            warn!(
                target: "sift::batch",
                document_id = document.id,
                error = %e,
                "Failed to add document"
            );
            rejected.push((document.id, e));
        }
    }
    rejected
}
