/// Event emitted by the shooting solver after each bisection trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Search bracket before this trial updates it.
    pub bracket: [f64; 2],

    /// The trial value of the free variable.
    pub x: f64,

    /// Residual at `x`.
    pub residual: f64,

    /// Residual at the lower end of the bracket.
    pub lower_residual: f64,
}
