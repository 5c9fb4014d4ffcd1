//! Error types for puzzle construction and algorithm selection.
//!
//! Both kinds are configuration failures: they are raised before a search
//! starts and are never produced by a running search. An exhausted frontier
//! is reported through [`crate::solver::SearchOutcome::Failure`] instead.

use thiserror::Error;

/// Errors raised while building a puzzle or choosing how to search it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The tile list is not a permutation of `0..dim*dim`, the blank count is
    /// not exactly one, or the requested size has no square grid.
    #[error("invalid puzzle: {reason}")]
    InvalidPuzzle {
        /// Human readable explanation of what was wrong.
        reason: String,
    },
    /// The algorithm selection is not one of `1`, `2` or `3`.
    #[error("invalid algorithm selection '{0}': expected 1, 2 or 3")]
    InvalidAlgorithmSelection(String),
}

impl PuzzleError {
    pub(crate) fn invalid_puzzle(reason: impl Into<String>) -> Self {
        PuzzleError::InvalidPuzzle {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PuzzleError>;
