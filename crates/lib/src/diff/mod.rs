//! First-divergence scanning for byte sequences.
//!
//! Serialized CRDT states are opaque byte buffers. Asserting that two of them
//! are identical only needs to know *where* they first differ, not a full diff,
//! so this module offers three levels of detail:
//!
//! * [`diff_position`] returns the first divergent index, or `None` when the
//!   inputs are identical.
//! * [`divergence`] returns the same index plus what each side holds there,
//!   with a short hex excerpt suitable for assertion messages.
//! * [`ensure_identical`] turns a divergence into an [`Error`](crate::Error).
//!
//! # Example
//!
//! ```
//! use yconverge::diff::diff_position;
//!
//! assert_eq!(diff_position(b"hello", b"hello"), None);
//! assert_eq!(diff_position(b"hello", b"help!"), Some(3));
//! assert_eq!(diff_position(b"hell", b"hello"), Some(4));
//! ```

mod errors;


pub use errors::DiffError;

use std::fmt;

/// Bytes shown before the divergent index in a [`Divergence`] excerpt.
const EXCERPT_LEAD: usize = 4;

/// Maximum bytes shown per side in a [`Divergence`] excerpt.
const EXCERPT_LEN: usize = 8;

/// Returns the index of the first byte at which `a` and `b` differ.
///
/// When one input is a strict prefix of the other, the result is the length of
/// the shorter input, the position where it ran out. `None` means the inputs
/// have the same length and the same contents.
///
/// Runs in `O(min(a.len(), b.len()))` and never reads out of bounds.
pub fn diff_position(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> Option<usize> {
    let (a, b) = (a.as_ref(), b.as_ref());

    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// What was found at the divergent index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Both sides have a byte at the index and they differ.
    Mismatch { left: u8, right: u8 },
    /// The left side ends at the index while the right continues.
    LeftEnded,
    /// The right side ends at the index while the left continues.
    RightEnded,
}

/// The first point where two byte sequences diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the first divergent byte, as returned by [`diff_position`].
    pub index: usize,
    /// What each side holds at `index`.
    pub kind: DivergenceKind,
    /// Offset of the first byte of both excerpts.
    pub excerpt_start: usize,
    /// Up to eight bytes of the left input from `excerpt_start`.
    pub left_excerpt: Vec<u8>,
    /// Up to eight bytes of the right input from `excerpt_start`.
    pub right_excerpt: Vec<u8>,
}

/// Locates the first divergence between `left` and `right`.
///
/// Returns `None` exactly when [`diff_position`] does; otherwise the returned
/// [`Divergence::index`] is the same index.
pub fn divergence(left: impl AsRef<[u8]>, right: impl AsRef<[u8]>) -> Option<Divergence> {
    let (left, right) = (left.as_ref(), right.as_ref());
    let index = diff_position(left, right)?;

    let kind = match (left.get(index), right.get(index)) {
        (Some(&l), Some(&r)) => DivergenceKind::Mismatch { left: l, right: r },
        (None, _) => DivergenceKind::LeftEnded,
        (Some(_), None) => DivergenceKind::RightEnded,
    };
    let excerpt_start = index.saturating_sub(EXCERPT_LEAD);

    Some(Divergence {
        index,
        kind,
        excerpt_start,
        left_excerpt: excerpt(left, excerpt_start),
        right_excerpt: excerpt(right, excerpt_start),
    })
}

fn excerpt(bytes: &[u8], start: usize) -> Vec<u8> {
    let tail = bytes.get(start..).unwrap_or_default();
    tail[..tail.len().min(EXCERPT_LEN)].to_vec()
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "first divergence at byte {}: ", self.index)?;
        match self.kind {
            DivergenceKind::Mismatch { left, right } => {
                write!(f, "left {left:02x}, right {right:02x}")?
            }
            DivergenceKind::LeftEnded => write!(f, "left ended, right continues")?,
            DivergenceKind::RightEnded => write!(f, "right ended, left continues")?,
        }
        write!(
            f,
            " (from byte {}: left [{}], right [{}])",
            self.excerpt_start,
            hex::encode(&self.left_excerpt),
            hex::encode(&self.right_excerpt)
        )
    }
}

/// Checks that `left` and `right` are byte-for-byte identical.
///
/// # Errors
/// Returns [`DiffError::Diverged`] describing the first divergence otherwise.
pub fn ensure_identical(left: impl AsRef<[u8]>, right: impl AsRef<[u8]>) -> crate::Result<()> {
    let (left, right) = (left.as_ref(), right.as_ref());
    let Some(divergence) = divergence(left, right) else {
        return Ok(());
    };

    tracing::debug!(
        index = divergence.index,
        left_len = left.len(),
        right_len = right.len(),
        "Byte sequences diverge"
    );
    Err(DiffError::Diverged {
        divergence,
        left_len: left.len(),
        right_len: right.len(),
    }
    .into())
}
