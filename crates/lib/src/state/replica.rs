//! Encoding, exchanging and comparing replica states.

use std::collections::BTreeMap;

use yrs::updates::decoder::Decode;
use yrs::updates::encoder::Encode;
use yrs::{Doc, GetString, Map, ReadTxn, StateVector, Transact, Update};

use super::StateError;
use crate::Result;
use crate::diff::{Divergence, divergence};

/// Encodes the full state of `doc` as a v1 update.
pub fn encode_state(doc: &Doc) -> Vec<u8> {
    doc.transact()
        .encode_state_as_update_v1(&StateVector::default())
}

/// Encodes the part of `doc` that a replica at `remote` has not seen yet.
pub fn encode_diff(doc: &Doc, remote: &StateVector) -> Vec<u8> {
    doc.transact().encode_state_as_update_v1(remote)
}

/// Current state vector of `doc`.
pub fn state_vector(doc: &Doc) -> StateVector {
    doc.transact().state_vector()
}

/// Current state vector of `doc`, v1-encoded.
pub fn encode_state_vector(doc: &Doc) -> Vec<u8> {
    state_vector(doc).encode_v1()
}

/// Decodes a v1-encoded state vector.
pub fn decode_state_vector(bytes: &[u8]) -> Result<StateVector> {
    StateVector::decode_v1(bytes).map_err(|e| {
        StateError::DecodeStateVector {
            reason: e.to_string(),
        }
        .into()
    })
}

/// Decodes a v1 update and applies it to `doc` in a single transaction.
pub fn apply_update(doc: &Doc, update: &[u8]) -> Result<()> {
    let decoded = Update::decode_v1(update).map_err(|e| StateError::DecodeUpdate {
        reason: e.to_string(),
    })?;

    let mut txn = doc.transact_mut();
    txn.apply_update(decoded)
        .map_err(|e| StateError::ApplyUpdate {
            reason: e.to_string(),
        })?;

    tracing::trace!(update_len = update.len(), "Applied update");
    Ok(())
}

/// Exchanges full states: `b`'s state into `a`, then `a`'s state into `b`.
///
/// ```
/// use yconverge::state::{encode_state, state_divergence, sync_full};
/// use yconverge::y_crdt::{Doc, Map, Transact};
///
/// let a = Doc::new();
/// let b = Doc::new();
/// let map = a.get_or_insert_map("v2");
/// map.insert(&mut a.transact_mut(), "key", "value");
///
/// sync_full(&a, &b)?;
/// assert_eq!(state_divergence(&a, &b), None);
/// assert!(!encode_state(&b).is_empty());
/// # Ok::<(), yconverge::Error>(())
/// ```
pub fn sync_full(a: &Doc, b: &Doc) -> Result<()> {
    apply_update(a, &encode_state(b))?;
    apply_update(b, &encode_state(a))?;
    Ok(())
}

/// Exchanges only what each side is missing according to its state vector.
pub fn sync_diff(a: &Doc, b: &Doc) -> Result<()> {
    let missing_in_a = encode_diff(b, &state_vector(a));
    apply_update(a, &missing_in_a)?;

    let missing_in_b = encode_diff(a, &state_vector(b));
    apply_update(b, &missing_in_b)?;

    tracing::debug!(
        sent_to_a = missing_in_a.len(),
        sent_to_b = missing_in_b.len(),
        "Synced replicas by state vector"
    );
    Ok(())
}

/// First divergence between the full encoded states of `a` and `b`.
pub fn state_divergence(a: &Doc, b: &Doc) -> Option<Divergence> {
    divergence(encode_state(a), encode_state(b))
}

/// Contents of the root map `name`, with values rendered as strings.
pub fn map_entries(doc: &Doc, name: &str) -> BTreeMap<String, String> {
    let map = doc.get_or_insert_map(name);
    let txn = doc.transact();
    map.iter(&txn)
        .map(|(key, value)| (key.to_string(), value.to_string(&txn)))
        .collect()
}

/// Contents of the root text `name`.
pub fn text_content(doc: &Doc, name: &str) -> String {
    let text = doc.get_or_insert_text(name);
    let txn = doc.transact();
    text.get_string(&txn)
}
