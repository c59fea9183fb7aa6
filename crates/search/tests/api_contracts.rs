//! Search API Contract Tests
//!
//! Exercises the public `SearchServer` surface end to end: ingestion,
//! ranking, exclusion, matching, removal, errors and shared access from
//! several threads.

use parking_lot::RwLock;
use sift_core::{DocumentId, DocumentStatus, Error};
use sift_search::{
    add_documents, process_queries, remove_duplicates, ExecutionMode, NewDocument, RequestQueue,
    SearchConfig, SearchServer, StopWords,
};
use std::sync::{Arc, Barrier};
use std::thread;

// ============================================================================
// Test Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn city_server() -> SearchServer {
    let mut server = SearchServer::new("in the").unwrap();
    server
        .add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])
        .unwrap();
    server
        .add_document(2, "dog in the city", DocumentStatus::Actual, &[8, 9, 7])
        .unwrap();
    server
}

fn pets_server() -> SearchServer {
    let mut server = SearchServer::new("and in on with").unwrap();
    let docs: [(DocumentId, &str, DocumentStatus, &[i32]); 6] = [
        (0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]),
        (1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]),
        (2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]),
        (3, "groomed starling eugene", DocumentStatus::Banned, &[9]),
        (4, "curly dog with fancy collar", DocumentStatus::Irrelevant, &[4, 4]),
        (5, "old cat on the windowsill", DocumentStatus::Removed, &[]),
    ];
    for (id, text, status, ratings) in docs {
        server.add_document(id, text, status, ratings).unwrap();
    }
    server
}

fn ids(hits: &[sift_core::Document]) -> Vec<DocumentId> {
    hits.iter().map(|d| d.id).collect()
}

// ============================================================================
// Ranking Contracts
// ============================================================================

/// Document matching both terms outranks the one matching a single term
#[test]
fn test_more_matching_terms_rank_higher() {
    let server = city_server();
    let hits = server.find_top_documents("cat city").unwrap();
    assert_eq!(ids(&hits), vec![1, 2]);
    assert!(hits[0].relevance > hits[1].relevance);
    assert_eq!(hits[0].rating, 2);
    assert_eq!(hits[1].rating, 8);
}

/// An excluded term removes a document even when other terms match
#[test]
fn test_minus_term_excludes_document() {
    let server = city_server();
    assert!(server.find_top_documents("-cat in").unwrap().is_empty());

    let hits = server.find_top_documents("city -cat").unwrap();
    assert_eq!(ids(&hits), vec![2]);
}

/// Stop words are neither indexed nor matched
#[test]
fn test_stop_words_do_not_match() {
    let server = city_server();
    assert!(server.find_top_documents("in the").unwrap().is_empty());
    assert_eq!(server.index().doc_freq("in"), 0);
    assert!(server.index().terms().all(|t| t != "the"));
}

/// Default ranking only sees `Actual` documents
#[test]
fn test_default_status_is_actual() {
    let server = pets_server();
    let hits = server.find_top_documents("cat collar groomed").unwrap();
    assert_eq!(ids(&hits), vec![0, 2, 1]);

    for (status, expected) in [
        (DocumentStatus::Banned, vec![3]),
        (DocumentStatus::Irrelevant, vec![4]),
        (DocumentStatus::Removed, vec![5]),
    ] {
        let hits = server
            .find_top_documents_by_status("cat collar groomed", status)
            .unwrap();
        assert_eq!(ids(&hits), expected, "status {}", status);
    }
}

/// Predicates see id, status and rating
#[test]
fn test_predicate_filters() {
    let server = pets_server();
    let hits = server
        .find_top_documents_by("cat dog collar groomed", |_, _, rating| rating >= 4)
        .unwrap();
    let mut found = ids(&hits);
    found.sort_unstable();
    assert_eq!(found, vec![1, 3, 4]);
}

/// Results never exceed the top-K limit and stay ordered
#[test]
fn test_result_limit_and_order() {
    let mut server = SearchServer::new("").unwrap();
    for id in 0..50 {
        let text = if id % 3 == 0 { "cat cat dog" } else { "cat dog bird" };
        server
            .add_document(id, text, DocumentStatus::Actual, &[id % 7])
            .unwrap();
    }
    server.add_document(50, "fish", DocumentStatus::Actual, &[]).unwrap();

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let hits = server
            .find_top_documents_with(mode, "cat bird", |_, _, _| true)
            .unwrap();
        assert_eq!(hits.len(), 5);
        for pair in hits.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.relevance - b.relevance > 1e-6
                    || ((a.relevance - b.relevance).abs() < 1e-6 && a.rating >= b.rating),
                "{} before {}",
                a,
                b
            );
        }
    }
}

/// Configured limit and case policy reach the ranker
#[test]
fn test_custom_config() {
    let config = SearchConfig::from_toml_str("max_results = 1\ncase_sensitive = false").unwrap();
    let mut server = SearchServer::with_config(StopWords::from_text("THE").unwrap(), config).unwrap();
    server
        .add_document(1, "The Cat", DocumentStatus::Actual, &[1])
        .unwrap();
    server
        .add_document(2, "the cat sat", DocumentStatus::Actual, &[2])
        .unwrap();
    server.add_document(3, "dog", DocumentStatus::Actual, &[]).unwrap();

    let hits = server.find_top_documents("CAT the").unwrap();
    assert_eq!(ids(&hits), vec![1]);
}

// ============================================================================
// Matching Contracts
// ============================================================================

/// Matched terms are sorted and unique; exclusion empties them
#[test]
fn test_match_document() {
    let server = pets_server();
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let m = server
            .match_document_with(mode, "tail fluffy cat fluffy dog", 1)
            .unwrap();
        assert_eq!(m.terms, vec!["cat", "fluffy", "tail"]);
        assert_eq!(m.status, DocumentStatus::Actual);

        let m = server.match_document_with(mode, "fluffy -tail", 1).unwrap();
        assert!(m.terms.is_empty());
        assert_eq!(m.status, DocumentStatus::Actual);

        let m = server.match_document_with(mode, "starling", 3).unwrap();
        assert_eq!(m.status, DocumentStatus::Banned);
    }
}

// ============================================================================
// Error Contracts
// ============================================================================

#[test]
fn test_add_errors() {
    let mut server = city_server();
    assert!(server
        .add_document(-1, "negative", DocumentStatus::Actual, &[])
        .unwrap_err()
        .is_invalid_argument());
    assert!(server
        .add_document(1, "duplicate", DocumentStatus::Actual, &[])
        .unwrap_err()
        .is_invalid_argument());
    assert!(server
        .add_document(3, "big dog star\u{12}ling", DocumentStatus::Actual, &[])
        .unwrap_err()
        .is_invalid_argument());
    assert_eq!(server.document_count(), 2);
    assert!(server.index().postings("big").is_none());
}

#[test]
fn test_query_errors() {
    let server = city_server();
    for bad in ["fluffy --cat", "fluffy -", "ca\u{1}t"] {
        let err = server.find_top_documents(bad).unwrap_err();
        assert!(err.is_invalid_argument(), "{:?} gave {}", bad, err);
    }
}

#[test]
fn test_match_errors() {
    let server = city_server();
    assert_eq!(
        server.match_document("cat", 7).unwrap_err(),
        Error::DocumentNotFound(7)
    );
    assert!(server.match_document("", 1).unwrap_err().is_invalid_argument());
}

// ============================================================================
// Removal Contracts
// ============================================================================

/// Removed documents vanish from iteration, frequencies and ranking
#[test]
fn test_add_then_remove() {
    init_tracing();
    let mut server = pets_server();
    for (id, mode) in [(1, ExecutionMode::Sequential), (2, ExecutionMode::Parallel)] {
        assert!(server.remove_document_with(mode, id));
        assert!(server.word_frequencies(id).is_empty());
        assert!(server.document_ids().all(|d| d != id));
    }
    assert!(server.index().postings("fluffy").is_none());
    assert!(server.index().postings("eyes").is_none());
    assert_eq!(ids(&server.find_top_documents("fluffy eyes cat").unwrap()), vec![0]);
    assert!(server.index().is_consistent());
}

// ============================================================================
// Collaborator Contracts
// ============================================================================

#[test]
fn test_collaborators_end_to_end() {
    init_tracing();
    let mut server = SearchServer::new("and with").unwrap();
    let rejected = add_documents(
        &mut server,
        vec![
            NewDocument::new(1, "funny pet and nasty rat", DocumentStatus::Actual, vec![7]),
            NewDocument::new(2, "funny pet with curly hair", DocumentStatus::Actual, vec![1]),
            NewDocument::new(2, "rejected duplicate id", DocumentStatus::Actual, vec![]),
            NewDocument::new(3, "funny pet with curly hair", DocumentStatus::Actual, vec![2]),
            NewDocument::new(4, "nasty rat with curly hair", DocumentStatus::Actual, vec![3]),
        ],
    );
    assert_eq!(rejected.len(), 1);

    assert_eq!(remove_duplicates(&mut server), vec![3]);

    let results = process_queries(&server, &["curly", "rat -hair", "missing"]).unwrap();
    assert_eq!(ids(&results[0]), vec![4, 2]);
    assert_eq!(ids(&results[1]), vec![1]);
    assert!(results[2].is_empty());

    let mut queue = RequestQueue::new(&server);
    queue.add_find_request("missing").unwrap();
    queue.add_find_request("curly").unwrap();
    assert_eq!(queue.no_result_requests(), 1);
}

// ============================================================================
// Shared Access
// ============================================================================

/// Readers rank in parallel while a writer removes documents
#[test]
fn test_shared_server_readers_and_writer() {
    const READERS: usize = 4;

    let mut server = SearchServer::new("").unwrap();
    for id in 0..200 {
        let text = format!("common word{} tag{}", id, id % 5);
        server
            .add_document(id, &text, DocumentStatus::Actual, &[id])
            .unwrap();
    }
    let server = Arc::new(RwLock::new(server));
    let barrier = Arc::new(Barrier::new(READERS + 1));

    let readers: Vec<_> = (0..READERS)
        .map(|i| {
            let server = Arc::clone(&server);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    let guard = server.read();
                    let mode = if i % 2 == 0 {
                        ExecutionMode::Parallel
                    } else {
                        ExecutionMode::Sequential
                    };
                    let hits = guard
                        .find_top_documents_with(mode, "common tag1 -tag2", |_, _, _| true)
                        .unwrap();
                    assert!(hits.len() <= 5);
                    assert!(hits.iter().all(|d| d.id % 5 != 2));
                }
            })
        })
        .collect();

    let writer = {
        let server = Arc::clone(&server);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for id in (0..200).step_by(2) {
                server.write().remove_document_with(ExecutionMode::Parallel, id);
            }
        })
    };

    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();

    let server = server.read();
    assert_eq!(server.document_count(), 100);
    assert!(server.index().is_consistent());
}
