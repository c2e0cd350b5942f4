//!
//! yconverge: cheap equality checks for serialized CRDT states.
//!
//! Replicas of a CRDT document are compared by their serialized state. Those
//! states are opaque byte buffers, so the core of this crate is a scanner that
//! finds the first byte where two buffers diverge.
//!
//! ## Core Concepts
//!
//! * **Divergence scanning (`diff`)**: [`diff_position`] locates the first
//!   divergent byte; [`divergence`] describes it; [`ensure_identical`] turns it
//!   into an [`Error`].
//! * **Replica state (`state`)**: helpers over the `yrs` document library for
//!   encoding, exchanging and comparing replica states, plus recorders for
//!   update and map events (requires the "y-crdt" feature).

pub mod diff;
pub mod state;

pub use diff::{Divergence, DivergenceKind, diff_position, divergence, ensure_identical};

/// Y-CRDT types re-exported for convenience when the "y-crdt" feature is enabled.
///
/// Client code working with [`state`] can use these instead of adding `yrs` as a
/// separate dependency.
#[cfg(feature = "y-crdt")]
pub mod y_crdt {
    pub use yrs::*;
}

/// Result type used throughout the yconverge library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the yconverge library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured comparison errors from the diff module
    #[error(transparent)]
    Diff(diff::DiffError),

    /// Structured replica state errors from the state module
    #[error(transparent)]
    State(state::StateError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Diff(_) => "diff",
            Error::State(_) => "state",
        }
    }

    /// Check if this error reports two diverging byte sequences.
    pub fn is_divergence(&self) -> bool {
        match self {
            Error::Diff(diff_err) => diff_err.is_divergence(),
            Error::State(_) => false,
        }
    }

    /// The first divergence, when this error reports one.
    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Error::Diff(diff_err) => diff_err.divergence(),
            Error::State(_) => None,
        }
    }

    /// Check if this error is related to replica state handling.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::State(_))
    }

    /// Check if this error comes from malformed encoded input.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::State(state_err) => state_err.is_decode_error(),
            Error::Diff(_) => false,
        }
    }
}
