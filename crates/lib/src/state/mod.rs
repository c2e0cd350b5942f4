//! Replica state helpers over the `yrs` document library.
//!
//! These wrap the handful of `yrs` calls needed to move state between
//! replicas (encode, diff against a state vector, apply) and to compare what
//! the replicas end up holding. Fallible calls return the crate [`Result`](crate::Result)
//! instead of the library's own error types.

mod errors;
#[cfg(feature = "y-crdt")]
pub mod observe;
#[cfg(feature = "y-crdt")]
mod replica;


pub use errors::StateError;
#[cfg(feature = "y-crdt")]
pub use observe::{KeyChange, KeyChanges, MapChangeRecorder, UpdateRecorder};
#[cfg(feature = "y-crdt")]
pub use replica::{
    apply_update, decode_state_vector, encode_diff, encode_state, encode_state_vector, map_entries,
    state_divergence, state_vector, sync_diff, sync_full, text_content,
};
