//! Duplicate document removal
//!
//! Two documents are duplicates when they contain the same set of terms,
//! whatever their frequencies. Ids are scanned in ascending order and the
//! first document of each term set is kept.

use crate::server::SearchServer;
use crate::ExecutionMode;
use rustc_hash::FxHashSet;
use sift_core::DocumentId;
use std::collections::BTreeSet;
use tracing::info;

/// Ids of documents whose term set already occurs under a smaller id
///
/// Returned in ascending order. The server is not modified.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: FxHashSet<BTreeSet<&str>> = FxHashSet::default();
    server
        .document_ids()
        .filter(|&id| {
            let terms = server.word_frequencies(id).keys().map(|t| &**t).collect();
            !seen.insert(terms)
        })
        .collect()
}

/// Remove every duplicate document and return the removed ids
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        info!(target: "sift::dedup", document_id = id, "Found duplicate document id {}", id);
        server.remove_document_with(ExecutionMode::Sequential, id);
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::DocumentStatus;

    fn add(server: &mut SearchServer, id: DocumentId, text: &str) {
        server
            .add_document(id, text, DocumentStatus::Actual, &[1, 2])
            .unwrap();
    }

    #[test]
    fn test_remove_duplicates() {
        let mut server = SearchServer::new("and with").unwrap();
        add(&mut server, 1, "funny pet and nasty rat");
        add(&mut server, 2, "funny pet with curly hair");
        // same words as 2
        add(&mut server, 3, "funny pet with curly hair");
        // differs from 2 only by stop words
        add(&mut server, 4, "funny pet and curly hair");
        // same set as 1, different frequencies
        add(&mut server, 5, "funny funny pet and nasty nasty rat");
        add(&mut server, 6, "funny pet and not very nasty rat");
        // same set as 6, different order
        add(&mut server, 7, "very nasty rat and not very funny pet");
        add(&mut server, 8, "pet with rat and rat and rat");
        // set is a subset, not a duplicate
        add(&mut server, 9, "nasty rat with curly hair");

        assert_eq!(find_duplicates(&server), vec![3, 4, 5, 7]);
        assert_eq!(server.document_count(), 9);

        let removed = remove_duplicates(&mut server);
        assert_eq!(removed, vec![3, 4, 5, 7]);
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
        assert!(server.index().is_consistent());
    }

    #[test]
    fn test_first_occurrence_wins_regardless_of_insertion_order() {
        let mut server = SearchServer::new("").unwrap();
        add(&mut server, 10, "alpha beta");
        add(&mut server, 2, "beta alpha");
        assert_eq!(remove_duplicates(&mut server), vec![10]);
        assert!(server.document(2).is_some());
    }

    #[test]
    fn test_empty_documents_are_duplicates_of_each_other() {
        let mut server = SearchServer::new("in the").unwrap();
        add(&mut server, 1, "in the");
        add(&mut server, 2, "");
        add(&mut server, 3, "cat");
        assert_eq!(remove_duplicates(&mut server), vec![2]);
    }

    #[test]
    fn test_no_duplicates() {
        let mut server = SearchServer::new("").unwrap();
        add(&mut server, 1, "a");
        add(&mut server, 2, "b");
        assert!(remove_duplicates(&mut server).is_empty());
        assert_eq!(server.document_count(), 2);
    }
}
