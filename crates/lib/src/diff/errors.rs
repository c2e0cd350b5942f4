//! Error types for byte-sequence comparison.

use thiserror::Error;

use super::Divergence;

/// Errors produced when two byte sequences were required to be identical.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DiffError {
    /// The sequences differ; `divergence` locates the first difference.
    #[error("Byte sequences diverge ({left_len} vs {right_len} bytes), {divergence}")]
    Diverged {
        divergence: Divergence,
        left_len: usize,
        right_len: usize,
    },
}

impl DiffError {
    /// Check if this error reports diverging sequences.
    pub fn is_divergence(&self) -> bool {
        matches!(self, DiffError::Diverged { .. })
    }

    /// The first divergence, when this error carries one.
    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            DiffError::Diverged { divergence, .. } => Some(divergence),
        }
    }
}

impl From<DiffError> for crate::Error {
    fn from(err: DiffError) -> Self {
        crate::Error::Diff(err)
    }
}
