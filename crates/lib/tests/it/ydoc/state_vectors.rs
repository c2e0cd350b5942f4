use yconverge::state::{
    apply_update, decode_state_vector, encode_state, encode_state_vector, state_vector, sync_full,
};
use yconverge::y_crdt::Doc;

use crate::helpers::*;

#[test]
fn test_docs_without_changes_have_the_same_state_vector() {
    let doc1 = doc_with_guid("test-doc1");
    let doc2 = doc_with_guid("test-doc1");

    let sv1 = decode_state_vector(&encode_state_vector(&doc1)).unwrap();
    let sv2 = decode_state_vector(&encode_state_vector(&doc2)).unwrap();
    assert_eq!(sv1, sv2);
}

#[test]
fn test_state_vectors_converge() {
    let doc1 = doc_with_guid("test-doc1");
    let doc2 = doc_with_guid("test-doc1");
    set(&doc1, "test", "hello");
    set(&doc2, "test", "hello");
    assert_ne!(state_vector(&doc1), state_vector(&doc2));

    sync_full(&doc1, &doc2).unwrap();

    let sv1 = decode_state_vector(&encode_state_vector(&doc1)).unwrap();
    let sv2 = decode_state_vector(&encode_state_vector(&doc2)).unwrap();
    assert_eq!(sv1, sv2);
    assert_eq!(sv1.len(), 2);
}

#[test]
fn test_vector_does_not_grow_with_each_restart() {
    let doc = Doc::new();
    let state1 = encode_state(&doc);
    assert_eq!(state_vector(&doc).len(), 0);

    set(&doc, "test1", "hello");
    assert_eq!(state_vector(&doc).len(), 1);

    // Restart: a fresh replica loads the state saved before any write
    let doc2 = Doc::new();
    apply_update(&doc2, &state1).unwrap();
    assert_eq!(state_vector(&doc2).len(), 0);

    set(&doc2, "test1", "hello");
    assert_eq!(state_vector(&doc2).len(), 1);
}

#[test]
fn test_restart_from_saved_state_keeps_foreign_clients_only() {
    let doc = Doc::new();
    set(&doc, "test1", "hello");
    let saved = encode_state(&doc);

    let restarted = Doc::new();
    apply_update(&restarted, &saved).unwrap();
    assert_eq!(state_vector(&restarted), state_vector(&doc));

    // The restarted replica writes under a new client id
    set(&restarted, "test1", "hello");
    assert_eq!(state_vector(&restarted).len(), 2);
}
