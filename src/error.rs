//! Error types for board construction and graph enumeration.

use derive_more::{Display, Error, From};

/// A board that cannot be trusted. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// Tiles are not a permutation of `0..N²`, or the blank is missing.
    #[display("invariant violation: {reason}")]
    InvariantViolation { reason: String },
    /// The number of cells is not a perfect square.
    #[display("dimension mismatch: {len} cells do not form a square board")]
    DimensionMismatch { len: usize },
    /// Square, but outside the range of sizes a state key can pack.
    #[display("unsupported board size {size}x{size} (expected 2 to 5)")]
    UnsupportedSize { size: usize },
}

impl PuzzleError {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }
}

/// Anything that aborts a traversal before the graph is complete.
#[derive(Debug, Display, Error, From)]
pub enum TraversalError {
    #[display("board rejected during traversal")]
    #[from]
    Puzzle(#[error(source)] PuzzleError),
    #[display("failed to write graph output")]
    #[from]
    Output(#[error(source)] std::io::Error),
    #[display("node limit of {limit} exceeded")]
    NodeLimitExceeded { limit: usize },
}
