use thiserror::Error;

use crate::grid::GridError;

/// Errors raised when a problem definition is inconsistent.
///
/// These are configuration errors: they surface when vectors of different
/// lengths are combined or when an index does not fit the problem.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("{kind} index {index} is out of range for length {len}")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("equation system has no equations")]
    EmptySystem,

    #[error("{kind} count mismatch: declared {declared}, found {found}")]
    CountMismatch {
        kind: &'static str,
        declared: usize,
        found: usize,
    },

    #[error("invalid time grid: {0}")]
    InvalidGrid(#[from] GridError),
}
