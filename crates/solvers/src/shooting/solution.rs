/// Indicates how the shooting solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket shrank below the requested precision around a sign change.
    Converged,
    /// The bracket never moved away from one of its original bounds, so it
    /// most likely does not contain a root.
    NotBracketed,
    /// Reached the iteration limit before the bracket was narrow enough.
    MaxIters,
    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a shooting solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Midpoint of the final bracket.
    ///
    /// Only applied to the problem when the status is [`Status::Converged`].
    pub root: f64,

    /// Final search bracket.
    pub bracket: [f64; 2],

    /// Number of bisection trials after the initial lower-bound run.
    pub iters: usize,

    /// Whether the target equation's initializer function was switched off.
    pub initializer_disabled: bool,
}

impl Solution {
    /// Returns `true` if the root was found and applied.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
