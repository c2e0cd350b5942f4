//! Error types for replica state handling.
//!
//! Errors raised by `yrs` are captured as text, so callers do not need to
//! depend on the library's error types.

use thiserror::Error;

/// Errors that can occur while moving state between replicas.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError {
    /// The bytes are not a valid v1 update
    #[error("Failed to decode update: {reason}")]
    DecodeUpdate { reason: String },

    /// The bytes are not a valid v1 state vector
    #[error("Failed to decode state vector: {reason}")]
    DecodeStateVector { reason: String },

    /// The document rejected a decoded update
    #[error("Failed to apply update: {reason}")]
    ApplyUpdate { reason: String },

    /// The document refused an observer subscription
    #[error("Failed to subscribe to document events: {reason}")]
    Subscribe { reason: String },
}

impl StateError {
    /// Check if this error comes from malformed input bytes.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            StateError::DecodeUpdate { .. } | StateError::DecodeStateVector { .. }
        )
    }

    /// Check if this error comes from applying an update.
    pub fn is_apply_error(&self) -> bool {
        matches!(self, StateError::ApplyUpdate { .. })
    }
}

impl From<StateError> for crate::Error {
    fn from(err: StateError) -> Self {
        crate::Error::State(err)
    }
}
